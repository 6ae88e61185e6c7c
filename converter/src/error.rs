use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(
        "image {} is {}x{}, smaller than the requested {}x{}",
        .path.display(), .actual.0, .actual.1, .requested.0, .requested.1
    )]
    Bounds {
        path: PathBuf,
        requested: (u32, u32),
        actual: (u32, u32),
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {message}", .path.display())]
    Manifest { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
