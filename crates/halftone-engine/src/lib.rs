//! Halftone engine crate.
//!
//! Window runtime, GPU device management, frame scheduling and the dithered
//! sphere renderer used by higher layers.

pub mod animation;
pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod sphere;
pub mod time;
pub mod window;
