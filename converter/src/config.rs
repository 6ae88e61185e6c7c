pub mod defaults;
mod file_config;

pub use file_config::{default_manifest, AssetConfig, FileConfig};
