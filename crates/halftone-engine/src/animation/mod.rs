//! Next-frame scheduling.
//!
//! Animated components never drive themselves: they ask a [`FrameScheduler`]
//! for the next display refresh and receive an [`AnimationHandle`] that they
//! later match against the handles the runtime reports as due.
//!
//! The runtime owns one [`FrameQueue`] per window. Requests made while a frame
//! is being handled become due on the following redraw, so a component that
//! re-requests as the last step of each frame forms a self-sustaining loop.

mod queue;

pub use queue::{AnimationHandle, FrameQueue, FrameScheduler};
