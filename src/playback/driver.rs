//! Render-loop cadence.

/// Monotonic tick counter gating frame advances to every `cadence`-th render
/// tick.
///
/// The counter only moves while playback is live; a paused session resumes on
/// the same cadence phase it stopped at.
#[derive(Debug, Default)]
pub struct TickDriver {
    ticks: u64,
}

impl TickDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one render tick and reports whether it lands on a cadence
    /// boundary. The very first tick always fires.
    pub fn advance(&mut self, cadence: u32) -> bool {
        let fire = self.ticks % u64::from(cadence.max(1)) == 0;
        self.ticks += 1;
        fire
    }

    /// Total ticks registered so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
