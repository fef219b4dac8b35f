/// Straight (non-premultiplied) RGBA color.
///
/// Components are expected in `[0, 1]`. The sphere shader multiplies by alpha
/// itself, so colors must never be premultiplied before they reach it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// True when every component lies in `[0, 1]`.
    #[inline]
    pub fn is_normalized(self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Clamps every component to `[0, 1]`; NaN becomes 0.
    #[inline]
    pub fn clamped(self) -> Self {
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self::new(c(self.r), c(self.g), c(self.b), c(self.a))
    }

    /// Converts to 8-bit channels, rounding to nearest.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        let q = |v: f32| (v * 255.0 + 0.5) as u8;
        [q(c.r), q(c.g), q(c.b), q(c.a)]
    }
}

impl From<[f32; 4]> for ColorRgba {
    fn from(c: [f32; 4]) -> Self {
        Self::from_array(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_pulls_components_into_unit_range() {
        let c = ColorRgba::new(-0.5, 1.5, 0.25, f32::NAN).clamped();
        assert_eq!(c, ColorRgba::new(0.0, 1.0, 0.25, 0.0));
        assert!(c.is_normalized());
    }

    #[test]
    fn to_rgba8_rounds() {
        assert_eq!(ColorRgba::white().to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(ColorRgba::new(0.5, 0.0, 0.0, 0.0).to_rgba8(), [128, 0, 0, 0]);
    }
}
