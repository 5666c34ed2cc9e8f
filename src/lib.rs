#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod assets;
pub mod config;
pub mod errors;
pub mod playback;
pub mod render;
pub mod resources;
pub mod scene;
pub mod utils;

pub use app::App;
pub use assets::{AssetReader, MeshLoader, MeshResult, MetadataResult};
pub use config::{NormalizePolicy, SetConfig, ViewerConfig};
pub use errors::{ObjbookError, Result};
pub use playback::{FrameRequest, MeshSlot, PlaybackSession, PlaybackState, TickDriver};
pub use render::Renderer;
pub use resources::{BoundingBox, Geometry, Material};
pub use scene::{Camera, Light, Node, Scene, Transform};
pub use utils::orbit_control::OrbitControls;
