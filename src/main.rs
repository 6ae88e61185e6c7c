#[macro_use]
extern crate log;

mod config;

use anyhow::Context;
use config::Config;
use converter::{config::default_manifest, convert_all, ImageCrateDecoder};
use fern::colors::{Color, ColoredLevelConfig};

fn setup_logger(config: &Config) -> anyhow::Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Cyan);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .level(log::LevelFilter::Error)
        .level_for("converter", config.verbosity)
        .level_for("assetbake", config.verbosity)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_cli()?;
    setup_logger(&config)?;

    if config.print_manifest {
        print!("{}", default_manifest());
        return Ok(());
    }

    let conversions = config.conversions()?;
    info!(
        "Baking {} assets in {}",
        conversions.len(),
        config.base_dir.display()
    );
    convert_all(&ImageCrateDecoder, &conversions)
        .with_context(|| format!("Failed to bake assets in {}", config.base_dir.display()))?;

    Ok(())
}
