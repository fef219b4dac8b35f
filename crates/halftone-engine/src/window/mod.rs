//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and windows, and wires each window to its GPU
//! context and frame queue.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::window::CursorIcon;
