use crate::{ConvertError, PixelRgba8, Result};
use image::{ImageReader, RgbaImage};
use std::path::Path;

/// A decoded pixel grid addressable by coordinate.
pub trait ImageView {
    fn dimensions(&self) -> (u32, u32);

    /// Returns `None` outside of the grid.
    fn get_pixel(&self, x: u32, y: u32) -> Option<PixelRgba8>;
}

/// Turns a file into an [`ImageView`]. Any image library can stand behind it.
pub trait Decoder {
    type View: ImageView;

    fn decode(&self, path: &Path) -> Result<Self::View>;
}

impl ImageView for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<PixelRgba8> {
        self.get_pixel_checked(x, y).map(|pixel| PixelRgba8::from(pixel.0))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl Decoder for ImageCrateDecoder {
    type View = RgbaImage;

    fn decode(&self, path: &Path) -> Result<RgbaImage> {
        let decode_error = |source| ConvertError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let image = ImageReader::open(path)
            .map_err(|e| decode_error(image::ImageError::IoError(e)))?
            .with_guessed_format()
            .map_err(|e| decode_error(image::ImageError::IoError(e)))?
            .decode()
            .map_err(decode_error)?;
        debug!(
            "Decoded {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );

        Ok(image.to_rgba8())
    }
}
