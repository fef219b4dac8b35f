use crate::coords::ColorRgba;

/// Default edge length of the avatar, in logical pixels.
pub const DEFAULT_SIZE: f32 = 44.0;

/// Mount-time configuration of one sphere instance.
///
/// Immutable for the lifetime of a mount. Changing any field goes through
/// [`SphereInstance::reconfigure`](super::SphereInstance::reconfigure), which
/// tears the instance down and rebuilds it.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereConfig {
    /// Edge length of the square surface in logical pixels.
    pub size: f32,
    /// Color of the lit, dithered-on cells. Straight alpha.
    pub color_front: ColorRgba,
    /// Color behind the sphere. Straight alpha; fully transparent by default.
    pub color_back: ColorRgba,
    /// Tag used in logs and GPU object labels.
    pub label: Option<String>,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            color_front: ColorRgba::white(),
            color_back: ColorRgba::transparent(),
            label: None,
        }
    }
}

impl SphereConfig {
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color_front(mut self, color: impl Into<ColorRgba>) -> Self {
        self.color_front = color.into();
        self
    }

    pub fn with_color_back(mut self, color: impl Into<ColorRgba>) -> Self {
        self.color_back = color.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Name for diagnostics: the label, or `"sphere"`.
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("sphere")
    }

    /// Returns the config with colors clamped into `[0, 1]`.
    ///
    /// Out-of-range input is a caller bug, but it must not reach the shader:
    /// it is logged and clamped rather than rejected.
    pub fn sanitized(mut self) -> Self {
        for (which, color) in [("front", &mut self.color_front), ("back", &mut self.color_back)] {
            if !color.is_normalized() {
                log::warn!(
                    "{}: color_{which} {:?} outside [0, 1]; clamping",
                    self.label.as_deref().unwrap_or("sphere"),
                    color.to_array()
                );
                *color = color.clamped();
            }
        }
        self
    }
}

/// Drawable target owned by one sphere instance.
///
/// Dimensions are device pixels, computed once at mount and never resized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderSurface {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl RenderSurface {
    /// Square surface of `logical_size × pixel_ratio` device pixels per edge.
    ///
    /// Fractional results are truncated, like assigning to a canvas size.
    /// Non-finite or non-positive inputs yield an empty surface, which the
    /// backend rejects at setup.
    pub fn square(logical_size: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let edge = logical_size * pixel_ratio;
        let edge = if edge.is_finite() && edge > 0.0 { edge as u32 } else { 0 };
        Self { width: edge, height: edge, pixel_ratio }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `[width, height]` as floats, the shader's `resolution`.
    #[inline]
    pub fn resolution(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_avatar_defaults() {
        let c = SphereConfig::default();
        assert_eq!(c.size, 44.0);
        assert_eq!(c.color_front, ColorRgba::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(c.color_back, ColorRgba::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn sanitized_clamps_colors() {
        let c = SphereConfig::default()
            .with_color_front([1.2, 0.5, -1.0, 1.0])
            .sanitized();
        assert_eq!(c.color_front, ColorRgba::new(1.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn surface_scales_by_pixel_ratio() {
        assert_eq!(RenderSurface::square(44.0, 1.0).width, 44);
        let s = RenderSurface::square(44.0, 2.0);
        assert_eq!((s.width, s.height), (88, 88));
    }

    #[test]
    fn surface_truncates_fractional_sizes() {
        let s = RenderSurface::square(44.0, 1.25);
        assert_eq!((s.width, s.height), (55, 55));
        let s = RenderSurface::square(44.0, 1.3);
        assert_eq!(s.width, 57); // 57.2
    }

    #[test]
    fn surface_rejects_degenerate_input() {
        assert!(RenderSurface::square(0.0, 2.0).is_empty());
        assert!(RenderSurface::square(f32::NAN, 2.0).is_empty());
        assert_eq!(RenderSurface::square(44.0, 0.0).pixel_ratio, 1.0);
    }
}
