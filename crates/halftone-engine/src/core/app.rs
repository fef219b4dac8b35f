use winit::event::WindowEvent;

use super::ctx::{EventCtx, FrameCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Continue, and redraw this window even if no frame is scheduled.
    Redraw,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for every window event before the runtime handles it.
    ///
    /// On `CloseRequested` this is the last chance to release GPU resources
    /// tied to the window.
    fn on_window_event(&mut self, ctx: &mut EventCtx<'_, '_>, event: &WindowEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called once per redraw per window.
    ///
    /// Redraws happen only while the window's frame queue has pending
    /// requests, or after an event callback returned [`AppControl::Redraw`].
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
