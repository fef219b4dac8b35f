use std::collections::BTreeSet;

/// Opaque token for one scheduled next-frame callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    /// Raw id, for logging.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Source of next-frame callbacks.
pub trait FrameScheduler {
    /// Schedules a callback for the next display refresh.
    fn request_frame(&mut self) -> AnimationHandle;

    /// Cancels a scheduled callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: AnimationHandle);
}

/// Per-window frame request queue.
///
/// Handles move through two sets:
/// - `pending`: requested, waiting for the next redraw
/// - `due`: released by [`advance`](Self::advance) for the current redraw
///
/// Cancellation removes a handle from either set, so a cancelled callback is
/// never handed out by [`pop_due`](Self::pop_due).
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: BTreeSet<AnimationHandle>,
    due: BTreeSet<AnimationHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a redraw: everything pending becomes due.
    ///
    /// Due handles left undispatched from the previous redraw are dropped; an
    /// unclaimed callback does not carry over.
    pub fn advance(&mut self) {
        if !self.due.is_empty() {
            log::trace!("dropping {} unclaimed frame callbacks", self.due.len());
        }
        self.due = std::mem::take(&mut self.pending);
    }

    /// Takes the next due handle in request order.
    pub fn pop_due(&mut self) -> Option<AnimationHandle> {
        self.due.pop_first()
    }

    /// True while any request awaits the next redraw.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_scheduled(&self, handle: AnimationHandle) -> bool {
        self.pending.contains(&handle) || self.due.contains(&handle)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> AnimationHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = AnimationHandle(self.next_id);
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: AnimationHandle) {
        self.pending.remove(&handle);
        self.due.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── request / advance ─────────────────────────────────────────────────

    #[test]
    fn requests_become_due_on_next_advance() {
        let mut q = FrameQueue::new();
        let h = q.request_frame();
        assert_eq!(q.pop_due(), None);

        q.advance();
        assert_eq!(q.pop_due(), Some(h));
        assert_eq!(q.pop_due(), None);
    }

    #[test]
    fn requests_made_during_a_frame_wait_for_the_next_one() {
        let mut q = FrameQueue::new();
        q.request_frame();
        q.advance();

        let first = q.pop_due();
        assert!(first.is_some());
        let next = q.request_frame();
        assert_eq!(q.pop_due(), None);
        assert!(q.has_pending());

        q.advance();
        assert_eq!(q.pop_due(), Some(next));
    }

    #[test]
    fn handles_are_unique() {
        let mut q = FrameQueue::new();
        let a = q.request_frame();
        let b = q.request_frame();
        assert_ne!(a, b);
        assert_eq!(q.pending_len(), 2);
    }

    // ── cancel ────────────────────────────────────────────────────────────

    #[test]
    fn cancel_removes_pending_request() {
        let mut q = FrameQueue::new();
        let h = q.request_frame();
        q.cancel_frame(h);
        assert!(!q.has_pending());

        q.advance();
        assert_eq!(q.pop_due(), None);
    }

    #[test]
    fn cancel_removes_due_request_before_dispatch() {
        let mut q = FrameQueue::new();
        let a = q.request_frame();
        let b = q.request_frame();
        q.advance();

        q.cancel_frame(b);
        assert_eq!(q.pop_due(), Some(a));
        assert_eq!(q.pop_due(), None);
        assert!(!q.is_scheduled(b));
    }

    #[test]
    fn unclaimed_due_handles_are_dropped_on_advance() {
        let mut q = FrameQueue::new();
        q.request_frame();
        q.advance();
        q.advance();
        assert_eq!(q.pop_due(), None);
    }
}
