/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Builds a color from unit floats, clamping each channel.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Linear blend from `self` (t = 0) towards `other` (t = 1).
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Card palette.
pub mod palette {
    use super::Rgb;

    pub const LOVE_RED: Rgb = Rgb::hex(0xe63946);
    pub const LOVE_PINK: Rgb = Rgb::hex(0xffb7b2);
    pub const LOVE_BG: Rgb = Rgb::hex(0xfff0f3);
    pub const DEEP_RED: Rgb = Rgb::hex(0x880d1e);

    pub const ENVELOPE: Rgb = Rgb::hex(0xffaebc);
    pub const ENVELOPE_INNER: Rgb = Rgb::hex(0xfc86aa);
    pub const PAPER: Rgb = Rgb::hex(0xffffff);
    pub const SURPRISE: Rgb = Rgb::hex(0xff0000);
    pub const HOT_PINK: Rgb = Rgb::hex(0xff69b4);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_channels() {
        assert_eq!(Rgb::hex(0xe63946), Rgb::new(0xe6, 0x39, 0x46));
    }

    #[test]
    fn lerp_hits_endpoints() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(255, 0, 100);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn from_unit_clamps() {
        assert_eq!(Rgb::from_unit(1.5, -0.2, 0.5), Rgb::new(255, 0, 128));
    }
}
