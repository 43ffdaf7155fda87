use std::time::{Duration, Instant};

/// Wall-clock timing for the frame loop.
///
/// `Instant` is monotonic, so deltas are never negative.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last_frame: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            frames: 0,
        }
    }

    /// Seconds since the previous grab (or since the clock started), then
    /// start the next frame interval from now
    pub fn grab_delta_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;
        delta.as_secs_f32()
    }

    /// Number of deltas grabbed so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Forget the current interval; the next delta is measured from now
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
