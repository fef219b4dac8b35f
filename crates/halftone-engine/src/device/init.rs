/// Initialization parameters for a window's GPU context.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB swapchain format.
    ///
    /// Off by default: sphere colours are authored as display values and are
    /// written to the swapchain untouched, the way a 2D canvas stores them.
    pub prefer_srgb: bool,

    /// Present mode. FIFO paces redraws to vsync.
    pub present_mode: wgpu::PresentMode,

    /// Preferred window compositing mode.
    ///
    /// Falls back to the first supported mode when unavailable.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::PostMultiplied),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    pub fn with_present_mode(mut self, mode: wgpu::PresentMode) -> Self {
        self.present_mode = mode;
        self
    }

    pub fn with_alpha_mode(mut self, mode: Option<wgpu::CompositeAlphaMode>) -> Self {
        self.alpha_mode = mode;
        self
    }
}
