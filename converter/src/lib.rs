#[macro_use]
extern crate log;

pub mod config;
mod convert;
mod decoder;
mod error;
mod pixel;

pub use convert::{convert, convert_all, encode, Conversion, ConversionReport};
pub use decoder::{Decoder, ImageCrateDecoder, ImageView};
pub use error::{ConvertError, Result};
pub use pixel::PixelRgba8;
