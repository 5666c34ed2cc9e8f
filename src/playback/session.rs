//! Playback session controller.
//!
//! The session owns the [`PlaybackState`] and the cadence driver, decides
//! which frame resources to request, and filters loader completions so that
//! out-of-order or superseded results never reach the scene.

use crate::assets::{MeshResult, MetadataResult};
use crate::config::ViewerConfig;
use crate::playback::driver::TickDriver;
use crate::playback::resolver;
use crate::playback::state::PlaybackState;

/// Shown in place of a set description when the metadata fetch fails.
pub const METADATA_FALLBACK: &str = "Set description unavailable.";

/// One mesh-frame load request.
///
/// `generation` identifies the session that issued it; `seq` orders requests
/// within the whole process lifetime. Both travel with the request through
/// the loader and come back on the completion, which is how stale results
/// are recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRequest {
    pub generation: u64,
    pub seq: u64,
    pub set: String,
    pub frame: u32,
    /// Resolved path, relative to the reader base.
    pub path: String,
}

/// One metadata fetch request, issued at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRequest {
    pub generation: u64,
    pub set: String,
    pub path: String,
}

/// Work to kick off when a session starts: the immediate frame-0 load and
/// the one-shot metadata fetch.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub frame: FrameRequest,
    pub metadata: MetadataRequest,
}

/// What to do with a mesh completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDecision {
    /// Newest successful result for the live session: swap it in.
    Apply,
    /// Superseded by a newer applied result or by a later session: drop it.
    Stale,
    /// Live request failed: playback has been halted.
    Halt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MetadataText {
    None,
    Pending,
    Loaded(String),
    Failed,
}

/// Controller for start/switch transitions and per-tick frame requests.
pub struct PlaybackSession {
    state: PlaybackState,
    config: ViewerConfig,
    driver: TickDriver,
    generation: u64,
    next_seq: u64,
    last_applied_seq: u64,
    metadata: MetadataText,
}

impl PlaybackSession {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        let state = PlaybackState::new(config.cadence);
        Self {
            state,
            config,
            driver: TickDriver::new(),
            generation: 0,
            next_seq: 0,
            last_applied_seq: 0,
            metadata: MetadataText::None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Starts playback of `set_id`, or switches to it mid-session.
    ///
    /// Calling this for the set that is already playing is a no-op; the
    /// sequence keeps running from wherever it was. Unknown set identifiers
    /// are logged and ignored. Otherwise the state is reset onto frame 0 of
    /// the new set and the returned [`SessionStart`] carries the immediate
    /// frame-0 load plus the metadata fetch for the caller to dispatch.
    pub fn start_playback(&mut self, set_id: &str) -> Option<SessionStart> {
        if self.state.is_playing && self.state.current_set.as_deref() == Some(set_id) {
            return None;
        }
        let Some(set) = self.config.set(set_id) else {
            log::warn!("start_playback: unknown set `{set_id}`");
            return None;
        };
        let total_frames = set.total_frames;

        self.generation += 1;
        self.state.begin_set(set_id, total_frames);
        self.metadata = MetadataText::Pending;
        log::info!("starting playback of set `{set_id}` ({total_frames} frames)");

        let frame = self.make_request(set_id, 0);
        let metadata = MetadataRequest {
            generation: self.generation,
            set: set_id.to_string(),
            path: resolver::metadata_path(set_id),
        };
        Some(SessionStart { frame, metadata })
    }

    /// Registers one render tick.
    ///
    /// On a cadence boundary this returns the load request for the current
    /// frame and advances the frame counter immediately; the advance never
    /// waits for the load to complete. Idle sessions do not tick the counter.
    pub fn tick(&mut self) -> Option<FrameRequest> {
        if !self.state.is_playing {
            return None;
        }
        if !self.driver.advance(self.state.cadence) {
            return None;
        }
        let set = self.state.current_set.clone()?;
        let request = self.make_request(&set, self.state.current_frame);
        self.state.advance_frame();
        Some(request)
    }

    /// Filters a mesh completion against the live session.
    ///
    /// Results from an earlier session generation, or ordered at or before
    /// the last applied result, are stale regardless of success. A live
    /// failure halts playback in place: the frame counter and set stay where
    /// they were, and nothing is retried.
    pub fn handle_mesh_result(&mut self, result: &MeshResult) -> SwapDecision {
        let request = &result.request;
        if request.generation != self.generation || request.seq <= self.last_applied_seq {
            log::debug!("discarding stale load completion for `{}`", request.path);
            return SwapDecision::Stale;
        }
        match &result.result {
            Ok(_) => {
                self.last_applied_seq = request.seq;
                SwapDecision::Apply
            }
            Err(err) => {
                log::error!("{err}");
                self.state.halt();
                SwapDecision::Halt
            }
        }
    }

    /// Records the outcome of the session's metadata fetch.
    pub fn handle_metadata_result(&mut self, result: &MetadataResult) {
        if result.generation != self.generation {
            return;
        }
        match &result.result {
            Ok(text) => {
                self.metadata = MetadataText::Loaded(text.trim_end().to_string());
            }
            Err(err) => {
                log::warn!("{err}");
                self.metadata = MetadataText::Failed;
            }
        }
    }

    /// Display text for the active set, once its fetch has settled.
    ///
    /// `None` while nothing has been requested or the fetch is still in
    /// flight; the fixed fallback string after a failed fetch.
    #[must_use]
    pub fn metadata_text(&self) -> Option<&str> {
        match &self.metadata {
            MetadataText::None | MetadataText::Pending => None,
            MetadataText::Loaded(text) => Some(text),
            MetadataText::Failed => Some(METADATA_FALLBACK),
        }
    }

    fn make_request(&mut self, set_id: &str, frame: u32) -> FrameRequest {
        self.next_seq += 1;
        FrameRequest {
            generation: self.generation,
            seq: self.next_seq,
            set: set_id.to_string(),
            frame,
            path: resolver::frame_path(set_id, frame, self.config.frame_pad, &self.config.frame_ext),
        }
    }
}
