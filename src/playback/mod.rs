//! Frame-sequence playback.
//!
//! The playback machinery is deliberately free of I/O and GPU types so the
//! whole state machine can be driven from tests:
//!
//! - [`PlaybackState`]: the mutable record of what is playing.
//! - [`resolver`]: pure mapping from (set, frame) to a resource path.
//! - [`TickDriver`]: the per-refresh cadence counter.
//! - [`PlaybackSession`]: session transitions, request issuing, and
//!   completion filtering.
//! - [`MeshSlot`]: exclusive owner of the displayed-mesh scene node.
//!
//! The session emits [`FrameRequest`] values and consumes loader results; the
//! application shell wires those to the asset loader and the scene.

pub mod driver;
pub mod resolver;
pub mod session;
pub mod state;
pub mod swap;

pub use driver::TickDriver;
pub use session::{FrameRequest, MetadataRequest, PlaybackSession, SessionStart, SwapDecision};
pub use state::PlaybackState;
pub use swap::MeshSlot;
