/// Opaque handle for one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host facility that invokes the next tick, like `requestAnimationFrame`.
///
/// The driver asks for exactly one tick at a time and may cancel it.
pub trait Scheduler {
    fn schedule_next(&mut self) -> FrameHandle;
    fn cancel(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: the caller fires pending ticks itself.
///
/// Used for headless rendering and deterministic tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the pending tick, as the host does right before invoking it.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Handles cancelled so far, oldest first.
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Total ticks ever scheduled.
    pub fn scheduled_count(&self) -> u64 {
        self.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}

/// Fake clock yielding evenly spaced millisecond timestamps.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    now_ms: f64,
    step_ms: f64,
}

impl FixedStepClock {
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
        }
    }

    /// A 60 Hz clock starting at zero.
    pub fn sixty_hz() -> Self {
        Self::new(0.0, 1000.0 / 60.0)
    }

    /// Return the current timestamp and advance by one step.
    pub fn next_timestamp(&mut self) -> f64 {
        let now = self.now_ms;
        self.now_ms += self.step_ms;
        now
    }
}
