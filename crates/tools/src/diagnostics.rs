use std::fmt;

/// Once-per-second diagnostic snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub fps: u32,
    pub object_count: usize,
    pub particle_count: usize,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fps={} objects={} particles={}",
            self.fps, self.object_count, self.particle_count
        )
    }
}

/// Receiver for periodic frame reports.
pub trait DiagnosticsSink {
    fn report(&mut self, report: &FrameReport);
}

/// Sink that logs each report through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&mut self, report: &FrameReport) {
        tracing::info!(
            fps = report.fps,
            objects = report.object_count,
            particles = report.particle_count,
            "frame report"
        );
    }
}

/// Counts frames in one-second windows of host timestamps (milliseconds).
///
/// The first timestamp opens the first window and counts as its first
/// frame. Each later window counts the ticks after the one that closed the
/// previous window, up to and including the tick that closes it. Frame
/// timing here is for display only and never feeds back into the simulation.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
    last_tick: Option<f64>,
    last_frame_ms: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick. Returns the frame rate when a window closes.
    pub fn record_frame(&mut self, timestamp_ms: f64) -> Option<u32> {
        self.last_frame_ms = self.last_tick.map_or(0.0, |t| timestamp_ms - t);
        self.last_tick = Some(timestamp_ms);

        self.frames += 1;
        let Some(start) = self.window_start else {
            self.window_start = Some(timestamp_ms);
            return None;
        };
        if timestamp_ms - start >= 1000.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start = Some(timestamp_ms);
            Some(self.fps)
        } else {
            None
        }
    }

    /// Frame rate of the last closed window, 0 before the first one closes.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Milliseconds between the two most recent ticks.
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_report_within_first_second() {
        let mut fps = FpsCounter::new();
        for i in 0..100 {
            assert_eq!(fps.record_frame(i as f64 * 9.0), None);
        }
        assert_eq!(fps.fps(), 0);
    }

    #[test]
    fn reports_frames_per_window() {
        let mut fps = FpsCounter::new();
        let mut reports = Vec::new();
        for i in 0..=200 {
            if let Some(r) = fps.record_frame(i as f64 * 10.0) {
                reports.push(r);
            }
        }
        // the opening tick belongs to the first window
        assert_eq!(reports, vec![101, 100]);
        assert_eq!(fps.fps(), 100);
        assert_eq!(fps.last_frame_ms(), 10.0);
    }

    #[test]
    fn long_stall_closes_window() {
        let mut fps = FpsCounter::new();
        fps.record_frame(0.0);
        fps.record_frame(16.0);
        assert_eq!(fps.record_frame(5000.0), Some(3));
        assert_eq!(fps.last_frame_ms(), 4984.0);
    }

    #[test]
    fn opening_tick_is_counted() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.record_frame(1000.0), None);
        assert_eq!(fps.record_frame(2000.0), Some(2));
        assert_eq!(fps.record_frame(3000.0), Some(1));
    }

    #[test]
    fn report_display() {
        let r = FrameReport {
            fps: 60,
            object_count: 941,
            particle_count: 200,
        };
        assert_eq!(r.to_string(), "fps=60 objects=941 particles=200");
    }
}
