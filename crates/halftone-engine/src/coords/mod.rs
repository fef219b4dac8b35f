//! Coordinate and color types shared by the renderer, the compositor and UI.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The sphere shader is the one exception: it works in device pixels with a
//! bottom-left origin, matching classic fragment-coordinate conventions.

mod color;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
