//! Frame scheduling.
//!
//! The render loop never calls itself. Each tick asks a [`FrameScheduler`] for
//! one callback before the next repaint and keeps the returned
//! [`FrameHandle`], so a restart or cleanup can always cancel the one frame in
//! flight before anything new is requested.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host primitive that runs a callback before the next repaint.
pub trait FrameScheduler {
    /// Request one callback. `None` means the host refused.
    fn schedule(&mut self) -> Option<FrameHandle>;

    /// Cancel a previously requested callback. Unknown handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

/// Scheduler driven by hand.
///
/// Clones share one queue, so a front-end can keep a clone and call
/// [`fire`](Self::fire) on its own clock while the animation owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks requested and not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Consume every pending callback. Returns `true` if any were due.
    pub fn fire(&self) -> bool {
        let mut queue = self.queue.borrow_mut();
        let due = !queue.pending.is_empty();
        queue.pending.clear();
        due
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> Option<FrameHandle> {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.pending.push(handle);
        Some(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue.borrow_mut().pending.retain(|h| *h != handle);
    }
}
