//! Window-side rendering.
//!
//! Sphere surfaces are drawn offscreen by their own programs; this module
//! composites them onto the window swapchain.
//!
//! Convention: CPU geometry is in logical pixels (top-left origin, +Y down);
//! vertex shaders convert to NDC through a viewport uniform.

mod composite;
mod ctx;

pub use composite::{CompositeLayer, SurfaceCompositor};
pub use ctx::{RenderCtx, RenderTarget};

/// `SrcAlpha, OneMinusSrcAlpha` on colour and alpha alike.
///
/// Straight (non-premultiplied) alpha: matches the classic
/// `blendFunc(SRC_ALPHA, ONE_MINUS_SRC_ALPHA)` state.
pub fn straight_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}
