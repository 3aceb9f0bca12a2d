//! Frame timing

use std::time::{Duration, Instant};

/// Counts presented frames and the wall time spent presenting them
#[derive(Debug)]
pub struct FrameCounter {
    started: Instant,
    frame_count: u64,
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCounter {
    /// Start counting now
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frame_count: 0,
        }
    }

    /// Record one presented frame
    pub fn tick(&mut self) {
        self.frame_count += 1;
    }

    /// Frames recorded so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time since the counter was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Average frames per second since creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        let secs = self.elapsed().as_secs_f32();
        if secs > 0.0 {
            self.frame_count as f32 / secs
        } else {
            0.0
        }
    }
}
