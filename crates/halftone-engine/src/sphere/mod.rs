//! Procedural dithered-sphere renderer.
//!
//! A sphere is lit by a slowly orbiting light, pixelated into a coarse grid
//! and thresholded through an 8×8 ordered-dither matrix, so every cell is
//! either fully front-coloured or fully back-coloured.
//!
//! - [`SphereInstance`] drives mount / frame / unmount / reconfigure.
//! - [`SphereBackend`] is the GPU seam; [`GpuSphereBackend`] is the wgpu one.
//! - [`shade`] is the CPU reference of the fragment stage.

mod backend;
mod config;
mod error;
mod lifecycle;
mod program;
pub mod shade;
mod uniforms;

pub use backend::SphereBackend;
pub use config::{RenderSurface, SphereConfig, DEFAULT_SIZE};
pub use error::{SetupError, ShaderStage};
pub use lifecycle::{SphereInstance, SpherePhase};
pub use program::{compile_stage, link, GpuSphereBackend, SphereProgram, SURFACE_FORMAT};
pub use uniforms::SphereUniforms;
