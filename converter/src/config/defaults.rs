use crate::Conversion;
use std::path::Path;

pub fn images_dir() -> &'static str {
    "images"
}

pub fn output_extension() -> &'static str {
    "bin"
}

/// The assets of the example program, relative to its directory.
pub fn conversions(base_dir: &Path) -> Vec<Conversion> {
    let images = base_dir.join(images_dir());

    vec![
        Conversion::new(images.join("fish.png"), images.join("fish.bin"), 100, 59),
        Conversion::new(images.join("window.png"), images.join("window.bin"), 320, 200),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn built_in_assets() {
        let conversions = conversions(Path::new("hello"));

        assert_eq!(2, conversions.len());
        assert_eq!(
            Conversion::new("hello/images/fish.png", "hello/images/fish.bin", 100, 59),
            conversions[0]
        );
        assert_eq!(
            Conversion::new("hello/images/window.png", "hello/images/window.bin", 320, 200),
            conversions[1]
        );
        assert_eq!(23600, conversions[0].byte_len());
        assert_eq!(256000, conversions[1].byte_len());
    }
}
