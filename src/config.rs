use clap::{arg, value_parser, Arg, ArgAction, ArgMatches, Command};
use converter::{
    config::{defaults, FileConfig},
    Conversion,
};
use log::LevelFilter;
use std::path::PathBuf;

pub struct Config {
    pub base_dir: PathBuf,
    pub manifest: Option<PathBuf>,
    pub print_manifest: bool,
    pub verbosity: LevelFilter,
}

impl Config {
    pub fn from_cli() -> anyhow::Result<Self> {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let verbosity = match matches.get_count("verbosity") {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Ok(Self {
            base_dir: matches
                .get_one::<PathBuf>("dir")
                .cloned()
                .unwrap_or_default(),
            manifest: matches.get_one::<PathBuf>("config").cloned(),
            print_manifest: matches.get_flag("print-manifest"),
            verbosity,
        })
    }

    pub fn conversions(&self) -> anyhow::Result<Vec<Conversion>> {
        if let Some(manifest) = &self.manifest {
            let config = FileConfig::new(manifest)?;
            Ok(config.conversions(&self.base_dir))
        } else {
            Ok(defaults::conversions(&self.base_dir))
        }
    }
}

fn command() -> Command {
    Command::new("Asset Baker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bakes PNG images into raw premultiplied BGRA pixel data")
        .args([
            arg!([DIR] "Directory of the example program, containing images/")
                .id("dir")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present("print-manifest"),
            arg!(-c --config <FILE> "Manifest of assets to bake instead of the built-in ones")
                .value_parser(value_parser!(PathBuf)),
            arg!(--"print-manifest" "Print a manifest template with the built-in assets and exit")
                .action(ArgAction::SetTrue),
            Arg::new("verbosity")
                .short('v')
                .help("Verbosity level: -v for warnings, -vv for info, -vvv for debug, -vvvv for trace")
                .action(ArgAction::Count),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let matches = command()
            .try_get_matches_from(std::iter::once("assetbake").chain(args.iter().copied()))?;
        Config::from_matches(&matches)
    }

    #[rstest]
    fn built_in() {
        let config = parse(&["hello"]).unwrap();

        assert_eq!(PathBuf::from("hello"), config.base_dir);
        assert_eq!(LevelFilter::Error, config.verbosity);
        assert!(!config.print_manifest);
        assert_eq!(
            defaults::conversions(&PathBuf::from("hello")),
            config.conversions().unwrap()
        );
    }

    #[rstest]
    #[case(&["-v", "hello"], LevelFilter::Warn)]
    #[case(&["-vv", "hello"], LevelFilter::Info)]
    #[case(&["hello", "-vvv"], LevelFilter::Debug)]
    #[case(&["-vvvvv", "hello"], LevelFilter::Trace)]
    fn verbosity(#[case] args: &[&str], #[case] expected: LevelFilter) {
        assert_eq!(expected, parse(args).unwrap().verbosity);
    }

    #[rstest]
    fn manifest() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[[asset]]\ninput = \"logo.png\"\nwidth = 4\nheight = 2\n").unwrap();

        let config = parse(&["hello", "--config", file.path().to_str().unwrap()]).unwrap();

        assert_eq!(
            vec![Conversion::new("hello/logo.png", "hello/logo.bin", 4, 2)],
            config.conversions().unwrap()
        );
    }

    #[rstest]
    fn missing_manifest() {
        let config = parse(&["hello", "-c", "/nonexistent/assets.toml"]).unwrap();

        assert!(config.conversions().is_err());
    }

    #[rstest]
    fn missing_dir() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--print-manifest"]).unwrap().print_manifest);
    }
}
