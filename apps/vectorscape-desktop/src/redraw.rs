use std::sync::Arc;
use vectorscape_driver::{FrameHandle, Scheduler};
use winit::window::Window;

/// Schedules ticks as winit redraw requests.
///
/// A tick is due when `RedrawRequested` arrives while a handle is pending.
/// Redraws the OS asks for on its own only re-present the last frame.
#[derive(Default)]
pub struct RedrawScheduler {
    window: Option<Arc<Window>>,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl RedrawScheduler {
    pub fn attach(&mut self, window: Arc<Window>) {
        if self.pending.is_some() {
            window.request_redraw();
        }
        self.window = Some(window);
    }

    /// Consume the pending handle, if a tick is due.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl Scheduler for RedrawScheduler {
    fn schedule_next(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_scheduler_tracks_pending() {
        let mut s = RedrawScheduler::default();
        let h = s.schedule_next();
        assert_eq!(s.take_pending(), Some(h));
        assert_eq!(s.take_pending(), None);
    }

    #[test]
    fn cancel_drops_pending_tick() {
        let mut s = RedrawScheduler::default();
        let h = s.schedule_next();
        s.cancel(h);
        assert_eq!(s.take_pending(), None);
    }
}
