use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{config::defaults, ConvertError, Conversion, Result};

pub fn default_manifest() -> String {
    format!(
        r#"# Every [[asset]] is baked into a raw dump of premultiplied BGRA pixels,
# width * height * 4 bytes, rows from the top left corner.
# Relative paths are resolved against the directory given on the command line.
# "output" defaults to the input path with the .{} extension.
[[asset]]
input = "{}/fish.png"
output = "{}/fish.bin"
width = 100
height = 59

[[asset]]
input = "{}/window.png"
width = 320
height = 200
"#,
        defaults::output_extension(),
        defaults::images_dir(),
        defaults::images_dir(),
        defaults::images_dir(),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AssetConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

impl AssetConfig {
    pub fn conversion(&self, base_dir: &Path) -> Conversion {
        let input = base_dir.join(&self.input);
        let output = match &self.output {
            Some(output) => base_dir.join(output),
            None => input.with_extension(defaults::output_extension()),
        };

        Conversion::new(input, output, self.width, self.height)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    #[serde(rename = "asset")]
    pub assets: Vec<AssetConfig>,
    #[serde(skip)]
    pub config_file: PathBuf,
}

impl FileConfig {
    pub fn new(config_path: &Path) -> Result<Self> {
        let manifest_error = |message: String| ConvertError::Manifest {
            path: config_path.to_path_buf(),
            message,
        };

        debug!("Reading manifest at {}", config_path.display());
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| manifest_error(format!("Manifest is not accessible: {e}")))?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| manifest_error(e.message().to_string()))?;
        config.config_file = config_path.to_path_buf();

        Ok(config)
    }

    /// Falls back to the built-in assets when the manifest lists none.
    pub fn conversions(&self, base_dir: &Path) -> Vec<Conversion> {
        if self.assets.is_empty() {
            warn!(
                "No assets in {}, using the built-in ones",
                self.config_file.display()
            );
            return defaults::conversions(base_dir);
        }

        self.assets
            .iter()
            .map(|asset| asset.conversion(base_dir))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    fn all() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[asset]]
input = "images/logo.png"
output = "/tmp/logo.raw"
width = 32
height = 16

[[asset]]
input = "sprites/ball.png"
width = 8
height = 8
        "#
        )
        .unwrap();

        let config = FileConfig::new(file.path()).unwrap();
        let conversions = config.conversions(Path::new("demo"));

        assert_eq!(file.path(), config.config_file);
        assert_eq!(2, conversions.len());
        assert_eq!(
            Conversion::new("demo/images/logo.png", "/tmp/logo.raw", 32, 16),
            conversions[0]
        );
        assert_eq!(
            Conversion::new("demo/sprites/ball.png", "demo/sprites/ball.bin", 8, 8),
            conversions[1]
        );
    }

    #[rstest]
    fn empty() {
        let file = NamedTempFile::new().unwrap();

        let config = FileConfig::new(file.path()).unwrap();

        assert_eq!(0, config.assets.len());
        assert_eq!(
            defaults::conversions(Path::new("demo")),
            config.conversions(Path::new("demo"))
        );
    }

    #[rstest]
    fn template() {
        let config: FileConfig = toml::from_str(&default_manifest()).unwrap();

        assert_eq!(
            defaults::conversions(Path::new("demo")),
            config.conversions(Path::new("demo"))
        );
    }

    #[rstest]
    #[case("[[asset]]\ninput = \"a.png\"\nwidth = 1\n")]
    #[case("[[asset]]\ninput = \"a.png\"\nwidth = -1\nheight = 1\n")]
    #[case("[[asset]]\ninput = \"a.png\"\nwidth = 1\nheight = 1\ncolor = \"srgb\"\n")]
    fn invalid(#[case] content: &str) {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();

        let config = FileConfig::new(file.path());

        assert!(matches!(config, Err(ConvertError::Manifest { .. })));
    }

    #[rstest]
    fn wrong_file() {
        let config = FileConfig::new(Path::new(""));

        assert!(matches!(config, Err(ConvertError::Manifest { .. })));
    }
}
