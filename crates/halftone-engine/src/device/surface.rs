use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

const SRGB_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

const LINEAR_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8Unorm,
    wgpu::TextureFormat::Rgba8Unorm,
];

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let preferred = if prefer_srgb { SRGB_FORMATS } else { LINEAR_FORMATS };
    preferred
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    if let Some(mode) = requested.filter(|m| caps.alpha_modes.contains(m)) {
        return mode;
    }
    let fallback = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
    if let Some(mode) = requested {
        log::info!("surface alpha mode {mode:?} unavailable, using {fallback:?}");
    }
    fallback
}

pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }
    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = error_action(&err);
    if action == SurfaceErrorAction::Reconfigured && size.width > 0 && size.height > 0 {
        surface.configure(device, config);
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(
        formats: &[wgpu::TextureFormat],
        alpha_modes: &[wgpu::CompositeAlphaMode],
    ) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats: formats.to_vec(),
            alpha_modes: alpha_modes.to_vec(),
            ..Default::default()
        }
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn linear_format_preferred_by_default() {
        let c = caps(
            &[wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Bgra8Unorm],
            &[],
        );
        assert_eq!(choose_surface_format(&c, false), Some(wgpu::TextureFormat::Bgra8Unorm));
        assert_eq!(choose_surface_format(&c, true), Some(wgpu::TextureFormat::Bgra8UnormSrgb));
    }

    #[test]
    fn format_falls_back_to_first() {
        let c = caps(&[wgpu::TextureFormat::Rgba16Float], &[]);
        assert_eq!(choose_surface_format(&c, false), Some(wgpu::TextureFormat::Rgba16Float));
        assert_eq!(choose_surface_format(&caps(&[], &[]), false), None);
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn post_multiplied_used_when_offered() {
        let c = caps(
            &[],
            &[wgpu::CompositeAlphaMode::Opaque, wgpu::CompositeAlphaMode::PostMultiplied],
        );
        let mode = choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PostMultiplied));
        assert_eq!(mode, wgpu::CompositeAlphaMode::PostMultiplied);
    }

    #[test]
    fn alpha_falls_back_to_first_supported() {
        let c = caps(&[], &[wgpu::CompositeAlphaMode::Opaque]);
        let mode = choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PostMultiplied));
        assert_eq!(mode, wgpu::CompositeAlphaMode::Opaque);
        assert_eq!(choose_alpha_mode(&caps(&[], &[]), None), wgpu::CompositeAlphaMode::Auto);
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(error_action(&wgpu::SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(error_action(&wgpu::SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(error_action(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(error_action(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
