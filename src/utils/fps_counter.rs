//! Frame-rate sampling.

use std::time::{Duration, Instant};

/// Accumulates frame counts and reports the rate about once per second.
pub struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
    accumulated: Duration,
    pub current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
            accumulated: Duration::ZERO,
            current_fps: 0.0,
        }
    }

    /// Registers a frame; returns the fresh rate when a sampling window
    /// (one second) closes.
    pub fn update(&mut self) -> Option<f32> {
        self.frame_count += 1;
        let now = Instant::now();
        self.accumulated += now - self.last_update;
        self.last_update = now;

        if self.accumulated.as_secs_f32() >= 1.0 {
            self.current_fps = self.frame_count as f32 / self.accumulated.as_secs_f32();
            self.accumulated = Duration::ZERO;
            self.frame_count = 0;
            return Some(self.current_fps);
        }
        None
    }
}
