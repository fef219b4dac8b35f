//! Core engine-facing contracts.
//!
//! The stable interface between the window runtime and higher layers: the
//! [`App`] trait and the per-callback contexts handed to it.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{EventCtx, FrameCtx, WindowCtx};
