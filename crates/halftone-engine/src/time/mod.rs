//! Time subsystem.
//!
//! Provides stable, testable timing utilities without coupling to the runtime:
//! - one `FrameClock` per window, ticked once per presented frame
//! - one `Stopwatch` per animated instance, measuring its own lifetime

mod frame_clock;
mod stopwatch;

pub use frame_clock::{FrameClock, FrameTime};
pub use stopwatch::Stopwatch;
