//! GPU device + window surface.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue for one window, configures
//! its swapchain with straight-alpha compositing where the platform allows,
//! and hands out per-frame encoders.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
