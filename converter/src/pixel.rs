/// One decoded pixel with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PixelRgba8 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scales the color channels by `a / 255`, truncating. Alpha is kept as is.
    pub fn premultiply(self) -> Self {
        let scale = |channel: u8| (u16::from(channel) * u16::from(self.a) / 255) as u8;

        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    pub fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    pub fn premultiplied_bgra(self) -> [u8; 4] {
        self.premultiply().to_bgra()
    }
}

impl From<[u8; 4]> for PixelRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}
