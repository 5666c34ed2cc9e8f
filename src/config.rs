//! Viewer configuration.
//!
//! Frame cadence, zero-pad width, the normalization target, and the per-set
//! frame counts all live here as data. A config can be loaded from a JSON
//! file or assembled from defaults plus CLI overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ObjbookError, Result};

/// Render ticks between consecutive frame advances.
pub const DEFAULT_CADENCE: u32 = 6;

/// Zero-pad width of the frame index in resource paths (`7` -> `"007"`).
pub const DEFAULT_FRAME_PAD: usize = 3;

/// Target size for [`NormalizePolicy::FitToSize`].
pub const DEFAULT_FIT_SIZE: f32 = 10.0;

/// File extension of frame resources.
pub const DEFAULT_FRAME_EXT: &str = "obj";

/// How a freshly loaded mesh is placed into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizePolicy {
    /// Display the mesh exactly as authored.
    None,
    /// Uniformly scale the mesh so its largest bounding-box dimension equals
    /// the given size, then recenter the scaled box at the scene origin.
    FitToSize(f32),
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        NormalizePolicy::FitToSize(DEFAULT_FIT_SIZE)
    }
}

/// One animation set: a named directory of sequential frame resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetConfig {
    /// Set identifier, also the directory name under the base path.
    pub id: String,
    /// Length of the cyclic frame sequence.
    pub total_frames: u32,
}

/// Top-level configuration for a viewer session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory or URL the frame paths are resolved against.
    pub base_path: String,
    /// Render ticks per frame advance.
    pub cadence: u32,
    /// Zero-pad width of the frame index.
    pub frame_pad: usize,
    /// Frame resource extension, without the dot.
    pub frame_ext: String,
    /// Mesh normalization applied on every swap.
    pub normalize: NormalizePolicy,
    /// Available animation sets, in trigger-key order.
    pub sets: Vec<SetConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_path: "./obj".to_string(),
            cadence: DEFAULT_CADENCE,
            frame_pad: DEFAULT_FRAME_PAD,
            frame_ext: DEFAULT_FRAME_EXT.to_string(),
            normalize: NormalizePolicy::default(),
            sets: vec![
                SetConfig {
                    id: "01".to_string(),
                    total_frames: 100,
                },
                SetConfig {
                    id: "02".to_string(),
                    total_frames: 200,
                },
            ],
        }
    }
}

impl ViewerConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Looks up a set by identifier.
    #[must_use]
    pub fn set(&self, id: &str) -> Option<&SetConfig> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// Checks the numeric invariants the playback machinery relies on.
    pub fn validate(&self) -> Result<()> {
        if self.cadence == 0 {
            return Err(ObjbookError::ConfigError(
                "cadence must be greater than zero".to_string(),
            ));
        }
        if self.sets.is_empty() {
            return Err(ObjbookError::ConfigError(
                "at least one animation set is required".to_string(),
            ));
        }
        for set in &self.sets {
            if set.total_frames == 0 {
                return Err(ObjbookError::ConfigError(format!(
                    "set `{}` must have at least one frame",
                    set.id
                )));
            }
        }
        if let NormalizePolicy::FitToSize(size) = self.normalize
            && size <= 0.0
        {
            return Err(ObjbookError::ConfigError(
                "fit_to_size target must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
