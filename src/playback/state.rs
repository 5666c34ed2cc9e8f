//! Playback state record.

/// Mutable record of the active playback session.
///
/// Owned by [`PlaybackSession`](super::PlaybackSession); the render-loop
/// driver and the session controller are the only writers, and both run on
/// the main thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    /// Whether the driver should advance frames.
    pub is_playing: bool,
    /// Identifier of the set frames are pulled from. `None` until the first
    /// session starts.
    pub current_set: Option<String>,
    /// Index into the active set's frame sequence. Always in
    /// `[0, total_frames)`.
    pub current_frame: u32,
    /// Length of the active set's cyclic frame sequence.
    pub total_frames: u32,
    /// Render ticks per frame advance.
    pub cadence: u32,
}

impl PlaybackState {
    /// Creates an idle state with the given cadence.
    #[must_use]
    pub fn new(cadence: u32) -> Self {
        Self {
            is_playing: false,
            current_set: None,
            current_frame: 0,
            total_frames: 1,
            cadence,
        }
    }

    /// Advances to the next frame, wrapping modulo `total_frames`.
    pub fn advance_frame(&mut self) {
        self.current_frame = (self.current_frame + 1) % self.total_frames;
    }

    /// Resets the state onto a new set, ready to play from frame zero.
    pub fn begin_set(&mut self, set_id: &str, total_frames: u32) {
        self.current_set = Some(set_id.to_string());
        self.current_frame = 0;
        self.total_frames = total_frames;
        self.is_playing = true;
    }

    /// Halts playback in place, keeping set and frame for inspection.
    pub fn halt(&mut self) {
        self.is_playing = false;
    }
}
