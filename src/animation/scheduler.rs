//! Frame scheduling behind explicit, cancellable request handles.
//!
//! The gallery never recurses into its own frame callback. It asks a
//! [`FrameScheduler`] for a frame, stores the returned [`FrameId`], and
//! only acts on a delivered frame whose id matches the stored one. A
//! cancelled or superseded id is therefore harmless even if the host
//! delivers it anyway.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Handle of a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u64);

/// Source of per-frame callbacks (`requestAnimationFrame` or equivalent)
pub trait FrameScheduler {
    /// Requests one callback on the next frame
    fn request_frame(&mut self) -> FrameId;

    /// Cancels a pending request. Unknown or already delivered ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Scheduler for hosts that poll: requested frames queue up until drained.
///
/// Used headless and by immediate-mode UIs, which drain once per repaint.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    pending: VecDeque<FrameId>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every frame requested so far
    pub fn take_due(&mut self) -> Vec<FrameId> {
        self.pending.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.push_back(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.retain(|pending| *pending != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_drain() {
        let mut scheduler = ManualFrameScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_ne!(a, b);
        assert_eq!(scheduler.pending_count(), 2);

        assert_eq!(scheduler.take_due(), vec![a, b]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut scheduler = ManualFrameScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        scheduler.cancel_frame(a);
        scheduler.cancel_frame(FrameId(999));
        assert_eq!(scheduler.take_due(), vec![b]);
    }
}
