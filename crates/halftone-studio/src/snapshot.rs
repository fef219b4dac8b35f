use std::path::Path;

use anyhow::{Context, Result};

use halftone_engine::sphere::{shade, RenderSurface, SphereConfig, SphereUniforms};

/// Renders one frame of `config` on the CPU.
pub fn render(config: &SphereConfig, pixel_ratio: f32, time: f32) -> Result<image::RgbaImage> {
    let config = config.clone().sanitized();
    let surface = RenderSurface::square(config.size, pixel_ratio);
    anyhow::ensure!(
        !surface.is_empty(),
        "snapshot surface is empty ({} px @ {pixel_ratio}x)",
        config.size
    );

    let uniforms = SphereUniforms::new(&config, &surface, time);
    let bytes: Vec<u8> = shade::rasterize(&surface, &uniforms)
        .into_iter()
        .flat_map(|c| c.to_rgba8())
        .collect();

    image::RgbaImage::from_raw(surface.width, surface.height, bytes)
        .context("pixel buffer does not match surface size")
}

pub fn write_png(config: &SphereConfig, pixel_ratio: f32, time: f32, path: &Path) -> Result<()> {
    let img = render(config, pixel_ratio, time)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {}x{} snapshot to {}", img.width(), img.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_has_device_pixel_dimensions() {
        let img = render(&SphereConfig::default(), 2.0, 0.0).unwrap();
        assert_eq!(img.dimensions(), (88, 88));
    }

    #[test]
    fn every_pixel_is_front_or_back() {
        let img = render(&SphereConfig::default(), 1.0, 1.7).unwrap();
        let mut lit = 0;
        for px in img.pixels() {
            match px.0 {
                [255, 255, 255, 255] => lit += 1,
                [0, 0, 0, 0] => {}
                other => panic!("unexpected pixel {other:?}"),
            }
        }
        assert!(lit > 0);
        assert!(lit < 44 * 44);
    }

    #[test]
    fn empty_surface_is_an_error() {
        assert!(render(&SphereConfig::default().with_size(0.0), 2.0, 0.0).is_err());
    }
}
