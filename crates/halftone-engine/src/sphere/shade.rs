//! CPU reference implementation of the dithered-sphere fragment stage.
//!
//! Mirrors `shaders/dithered_sphere.wgsl` operation for operation. It backs
//! the headless snapshot path and lets the shading be tested without a GPU.
//!
//! Coordinates follow the fragment-stage convention: device pixels, origin at
//! the bottom-left corner, pixel centres at `n + 0.5`.

use crate::coords::{ColorRgba, Vec2};

use super::config::RenderSurface;
use super::uniforms::SphereUniforms;

/// Standard 8×8 ordered-dither (Bayer) permutation of `0..64`, row-major.
pub const BAYER_8X8: [u8; 64] = [
     0, 32,  8, 40,  2, 34, 10, 42,
    48, 16, 56, 24, 50, 18, 58, 26,
    12, 44,  4, 36, 14, 46,  6, 38,
    60, 28, 52, 20, 62, 30, 54, 22,
     3, 35, 11, 43,  1, 33,  9, 41,
    51, 19, 59, 27, 49, 17, 57, 25,
    15, 47,  7, 39, 13, 45,  5, 37,
    63, 31, 55, 23, 61, 29, 53, 21,
];

/// Rotation applied to the shape coordinate, in degrees.
pub const ROTATION_DEG: f32 = 0.0;

/// Pixelization cell edge, in CSS pixels (multiplied by the pixel ratio).
const CELL_SIZE: f32 = 1.5;
/// Shape-coordinate expansion relative to logical size.
const SHAPE_SCALE: f32 = 0.25;
/// Sphere radius scale applied to the shape coordinate.
const SPHERE_SCALE: f32 = 0.0018;

/// `step(edge, x)`: 1 when `x >= edge`, else 0.
#[inline]
pub fn step(edge: f32, x: f32) -> f32 {
    if x >= edge { 1.0 } else { 0.0 }
}

/// Floored modulo, always in `[0, m)` for positive `m`.
#[inline]
fn floor_mod(x: f32, m: f32) -> f32 {
    x - m * (x / m).floor()
}

/// Normalized threshold in `[0, 1)` for a grid coordinate.
///
/// Integer cell `(x mod 8, y mod 8)` indexes the row-major Bayer matrix; the
/// pattern repeats every 8 cells on both axes, negative coordinates included.
pub fn bayer_threshold(coord: Vec2) -> f32 {
    let x = floor_mod(coord.x, 8.0) as usize;
    let y = floor_mod(coord.y, 8.0) as usize;
    // Guard against x == 8 from rounding in floor_mod at tiny negative inputs.
    let index = (y.min(7)) * 8 + x.min(7);
    BAYER_8X8[index] as f32 / 64.0
}

/// Un-normalized light direction for halved time `t`.
///
/// Horizontal and depth components orbit at 1.5× and 1.25× so the sweep
/// never settles into a plain circle.
#[inline]
pub fn light_vector(t: f32) -> [f32; 3] {
    [(1.5 * t).cos(), 0.8, (1.25 * t).sin()]
}

/// Unit light direction for halved time `t`.
pub fn light_direction(t: f32) -> [f32; 3] {
    let [x, y, z] = light_vector(t);
    let len = (x * x + y * y + z * z).sqrt();
    [x / len, y / len, z / len]
}

/// Rotates `v` by `deg` degrees (column-major `mat2(c, s, -s, c) * v`).
#[inline]
pub fn rotate(v: Vec2, deg: f32) -> Vec2 {
    let r = deg.to_radians();
    let (s, c) = r.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

/// Two-layer straight-alpha compositing of the binary dither result.
///
/// `color = front.rgb·front.a·res + back.rgb·back.a·(1 − front.a·res)` and
/// `opacity = front.a·res + back.a·(1 − front.a·res)`.
pub fn composite(res: f32, front: ColorRgba, back: ColorRgba) -> ColorRgba {
    let cover = front.a * res;
    let keep = 1.0 - cover;
    ColorRgba::new(
        front.r * front.a * res + back.r * back.a * keep,
        front.g * front.a * res + back.g * back.a * keep,
        front.b * front.a * res + back.b * back.a * keep,
        cover + back.a * keep,
    )
}

/// Intermediate values of one fragment evaluation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fragment {
    /// Half-Lambert term, zeroed outside the silhouette.
    pub shape: f32,
    /// Centred Bayer offset in `[-0.5, 0.5)`.
    pub dither: f32,
    /// Binary dither result: exactly 0 or 1.
    pub res: f32,
    /// Output `(color, opacity)`.
    pub color: ColorRgba,
}

/// Evaluates the fragment stage at `frag` (bottom-left origin, device px).
pub fn shade_fragment(frag: Vec2, u: &SphereUniforms) -> Fragment {
    let t = 0.5 * u.time;
    let resolution = Vec2::new(u.resolution[0], u.resolution[1]);

    // Pixelization onto a grid of 1.5 CSS px cells centred on the surface.
    let px_size = CELL_SIZE * u.pixel_ratio;
    let cell = (frag - resolution * 0.5) / px_size;
    let uv = (cell.floor() * px_size).div_elem(resolution);

    // Shape coordinate.
    let shape_uv = uv.mul_elem(resolution) / u.pixel_ratio / SHAPE_SCALE;
    let shape_uv = rotate(shape_uv, ROTATION_DEG) + Vec2::splat(0.5);

    // Sphere.
    let shape_uv = shape_uv * SPHERE_SCALE;
    let d = 1.0 - shape_uv.length_squared();
    let normal = [shape_uv.x, shape_uv.y, d.max(0.0).sqrt()];
    let light = light_direction(t);
    let lambert = light[0] * normal[0] + light[1] * normal[1] + light[2] * normal[2];
    let shape = (0.5 + 0.5 * lambert) * step(0.0, d);

    // Ordered dithering over the pre-pixelized cell coordinate.
    let dither = bayer_threshold(cell) - 0.5;
    let res = step(0.5, shape + dither);

    let color = composite(
        res,
        ColorRgba::from_array(u.color_front),
        ColorRgba::from_array(u.color_back),
    );

    Fragment { shape, dither, res, color }
}

/// `SrcAlpha, OneMinusSrcAlpha` blend on colour and alpha alike.
pub fn blend_src_alpha(src: ColorRgba, dst: ColorRgba) -> ColorRgba {
    let inv = 1.0 - src.a;
    ColorRgba::new(
        src.r * src.a + dst.r * inv,
        src.g * src.a + dst.g * inv,
        src.b * src.a + dst.b * inv,
        src.a * src.a + dst.a * inv,
    )
}

/// Renders a whole surface the way one GPU frame does: clear to transparent,
/// then blend every fragment over it.
///
/// Rows are returned top to bottom, `width × height` pixels.
pub fn rasterize(surface: &RenderSurface, u: &SphereUniforms) -> Vec<ColorRgba> {
    let (w, h) = (surface.width as usize, surface.height as usize);
    let mut pixels = Vec::with_capacity(w * h);
    for row in 0..h {
        // Row 0 is the top edge; fragment y grows upwards.
        let fy = (h - 1 - row) as f32 + 0.5;
        for col in 0..w {
            let frag = Vec2::new(col as f32 + 0.5, fy);
            let src = shade_fragment(frag, u).color;
            pixels.push(blend_src_alpha(src, ColorRgba::transparent()));
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::SphereConfig;

    fn uniforms(config: &SphereConfig, pixel_ratio: f32, time: f32) -> (RenderSurface, SphereUniforms) {
        let surface = RenderSurface::square(config.size, pixel_ratio);
        (surface, SphereUniforms::new(config, &surface, time))
    }

    // ── bayer ─────────────────────────────────────────────────────────────

    #[test]
    fn bayer_matrix_is_a_permutation() {
        let mut seen = [false; 64];
        for v in BAYER_8X8 {
            assert!(!seen[v as usize], "duplicate {v}");
            seen[v as usize] = true;
        }
    }

    #[test]
    fn bayer_matrix_matches_reference_rows() {
        assert_eq!(&BAYER_8X8[0..8], &[0, 32, 8, 40, 2, 34, 10, 42]);
        assert_eq!(&BAYER_8X8[56..64], &[63, 31, 55, 23, 61, 29, 53, 21]);
    }

    #[test]
    fn bayer_lookup_indexes_row_major() {
        for y in 0..16 {
            for x in 0..16 {
                let expected = BAYER_8X8[(y % 8) * 8 + (x % 8)] as f32 / 64.0;
                let got = bayer_threshold(Vec2::new(x as f32 + 0.25, y as f32 + 0.75));
                assert_eq!(got, expected, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn bayer_lookup_is_periodic_including_negative_cells() {
        for y in -12..12 {
            for x in -12..12 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let base = bayer_threshold(p);
                assert_eq!(base, bayer_threshold(p + Vec2::new(8.0, 0.0)));
                assert_eq!(base, bayer_threshold(p + Vec2::new(0.0, -8.0)));
                assert!((0.0..1.0).contains(&base));
            }
        }
    }

    // ── light ─────────────────────────────────────────────────────────────

    #[test]
    fn light_vector_components_bounded_and_direction_is_unit() {
        for i in 0..2000 {
            let t = 0.5 * (i as f32 * 0.37);
            for c in light_vector(t) {
                assert!((-1.0..=1.0).contains(&c));
            }
            let [x, y, z] = light_direction(t);
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "len {len} at t {t}");
        }
    }

    #[test]
    fn light_orbits_at_two_rates() {
        // At t = 2π/1.5 the horizontal term has completed a cycle but depth has not.
        let t = std::f32::consts::TAU / 1.5;
        let [x, _, z] = light_vector(t);
        assert!((x - 1.0).abs() < 1e-5);
        assert!(z.abs() > 0.5);
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn zero_rotation_is_identity() {
        let v = Vec2::new(3.0, -7.5);
        assert_eq!(rotate(v, ROTATION_DEG), v);
    }

    #[test]
    fn quarter_turn_rotates_counter_clockwise() {
        let r = rotate(Vec2::new(1.0, 0.0), 90.0);
        assert!(r.x.abs() < 1e-6 && (r.y - 1.0).abs() < 1e-6);
    }

    // ── step / dither result ──────────────────────────────────────────────

    #[test]
    fn dither_result_is_binary() {
        let config = SphereConfig::default();
        for &dpr in &[1.0, 1.5, 2.0, 3.0] {
            let (surface, u) = uniforms(&config, dpr, 7.3);
            for y in 0..surface.height {
                for x in 0..surface.width {
                    let f = shade_fragment(Vec2::new(x as f32 + 0.5, y as f32 + 0.5), &u);
                    assert!(f.res == 0.0 || f.res == 1.0);
                    assert!((-0.5..0.5).contains(&f.dither));
                }
            }
        }
    }

    #[test]
    fn step_is_binary_for_arbitrary_inputs() {
        for i in -100..100 {
            let s = step(0.5, i as f32 * 0.013);
            assert!(s == 0.0 || s == 1.0);
        }
        assert_eq!(step(0.5, 0.5), 1.0);
    }

    #[test]
    fn avatar_surface_lies_inside_the_silhouette() {
        let config = SphereConfig::default();
        let (surface, u) = uniforms(&config, 2.0, 0.0);
        let corner = shade_fragment(Vec2::new(0.5, 0.5), &u);
        let far = shade_fragment(Vec2::new(surface.width as f32 - 0.5, surface.height as f32 - 0.5), &u);
        assert!(corner.shape > 0.0);
        assert!(far.shape > 0.0);
    }

    #[test]
    fn outside_silhouette_shape_is_zero() {
        // A huge surface pushes corners past |shape_uv| = 1.
        let config = SphereConfig::default().with_size(4000.0);
        let (_, u) = uniforms(&config, 1.0, 0.0);
        let f = shade_fragment(Vec2::new(0.5, 0.5), &u);
        assert_eq!(f.shape, 0.0);
        assert_eq!(f.res, 0.0);
    }

    #[test]
    fn shading_changes_over_time() {
        let config = SphereConfig::default();
        let (surface, a) = uniforms(&config, 2.0, 0.0);
        let (_, b) = uniforms(&config, 2.0, 3.0);
        assert_ne!(rasterize(&surface, &a), rasterize(&surface, &b));
    }

    // ── compositing ───────────────────────────────────────────────────────

    #[test]
    fn transparent_back_and_unlit_cell_is_fully_transparent() {
        let c = composite(0.0, ColorRgba::white(), ColorRgba::transparent());
        assert_eq!(c.a, 0.0);
        assert_eq!((c.r, c.g, c.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn lit_cell_with_white_front_is_opaque_white() {
        let c = composite(1.0, ColorRgba::white(), ColorRgba::transparent());
        assert_eq!(c, ColorRgba::white());
    }

    #[test]
    fn half_transparent_front_lets_back_through() {
        let front = ColorRgba::new(1.0, 0.0, 0.0, 0.5);
        let back = ColorRgba::new(0.0, 0.0, 1.0, 1.0);
        let c = composite(1.0, front, back);
        assert_eq!(c, ColorRgba::new(0.5, 0.0, 0.5, 1.0));
    }

    #[test]
    fn compositing_is_not_a_plain_lerp() {
        let front = ColorRgba::new(1.0, 1.0, 1.0, 0.5);
        let back = ColorRgba::new(0.0, 0.0, 0.0, 0.0);
        let c = composite(1.0, front, back);
        // A lerp by res would give rgb 1.0; the front is premultiplied instead.
        assert_eq!(c.r, 0.5);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn unlit_pixels_of_default_avatar_have_zero_alpha() {
        let config = SphereConfig::default();
        let (surface, u) = uniforms(&config, 1.0, 1.0);
        let pixels = rasterize(&surface, &u);
        assert_eq!(pixels.len(), 44 * 44);
        assert!(pixels.iter().any(|p| p.a == 0.0));
        assert!(pixels.iter().any(|p| p.a == 1.0));
        assert!(pixels.iter().all(|p| p.a == 0.0 || p.a == 1.0));
    }
}
