use bytemuck::{Pod, Zeroable};

use super::config::{RenderSurface, SphereConfig};

/// Per-frame inputs of the dithered-sphere fragment stage.
///
/// Matches the WGSL `SphereUniforms` block byte for byte (48 bytes, 16-byte
/// aligned). The CPU reference shader reads the same struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SphereUniforms {
    pub color_back: [f32; 4],
    pub color_front: [f32; 4],
    /// Surface size in device pixels.
    pub resolution: [f32; 2],
    /// Seconds since the instance started.
    pub time: f32,
    pub pixel_ratio: f32,
}

impl SphereUniforms {
    pub fn new(config: &SphereConfig, surface: &RenderSurface, time: f32) -> Self {
        Self {
            color_back: config.color_back.to_array(),
            color_front: config.color_front.to_array(),
            resolution: surface.resolution(),
            time,
            pixel_ratio: surface.pixel_ratio,
        }
    }

    /// Size in bytes as seen by the GPU.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Binding size for the uniform buffer layout entry.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(Self::SIZE).expect("SphereUniforms has non-zero size by construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_48_bytes() {
        assert_eq!(SphereUniforms::SIZE, 48);
        assert_eq!(SphereUniforms::SIZE % 16, 0);
    }

    #[test]
    fn new_copies_config_and_surface() {
        let config = SphereConfig::default();
        let surface = RenderSurface::square(44.0, 2.0);
        let u = SphereUniforms::new(&config, &surface, 3.5);
        assert_eq!(u.resolution, [88.0, 88.0]);
        assert_eq!(u.pixel_ratio, 2.0);
        assert_eq!(u.time, 3.5);
        assert_eq!(u.color_front, [1.0; 4]);
        assert_eq!(u.color_back, [0.0; 4]);
    }
}
