//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! The main error type [`ObjbookError`] covers all failure modes including:
//! - GPU initialization failures
//! - Mesh fetching and parsing errors
//! - Metadata fetching errors
//! - Configuration errors
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ObjbookError>`.

use thiserror::Error;

/// The main error type for the objbook viewer.
///
/// Each variant provides specific context about what went wrong.
#[derive(Error, Debug)]
pub enum ObjbookError {
    // ========================================================================
    // GPU & Windowing Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the rendering surface for a window.
    #[error("Failed to create rendering surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// The adapter offers no usable surface configuration.
    #[error("No compatible surface configuration for this adapter")]
    SurfaceConfigMissing,

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Playback & Asset Errors
    // ========================================================================
    /// A mesh frame could not be fetched or parsed.
    ///
    /// Carries the resolved resource path so a halted playback session can be
    /// traced back to the frame that broke it.
    #[error("Mesh load failed for `{path}`: {source}")]
    MeshLoadFailed {
        /// Resolved path of the frame that failed
        path: String,
        #[source]
        source: Box<ObjbookError>,
    },

    /// The descriptive metadata for a set could not be fetched.
    #[error("Metadata fetch failed for set `{set}`: {source}")]
    MetadataFetchFailed {
        /// Identifier of the set whose metadata was requested
        set: String,
        #[source]
        source: Box<ObjbookError>,
    },

    /// OBJ document parsing error.
    #[error("OBJ parse error: {0}")]
    ObjParseError(String),

    /// Configuration validation error.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // HTTP & Network Errors
    // ========================================================================
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// HTTP response error with status code.
    #[error("HTTP response error: status {status}")]
    HttpResponseError {
        /// HTTP status code
        status: u16,
    },

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<obj::ObjError> for ObjbookError {
    fn from(err: obj::ObjError) -> Self {
        ObjbookError::ObjParseError(err.to_string())
    }
}

impl ObjbookError {
    /// Wraps an underlying error as a mesh-load failure for `path`.
    #[must_use]
    pub fn mesh_load(path: impl Into<String>, source: ObjbookError) -> Self {
        ObjbookError::MeshLoadFailed {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Wraps an underlying error as a metadata-fetch failure for `set`.
    #[must_use]
    pub fn metadata_fetch(set: impl Into<String>, source: ObjbookError) -> Self {
        ObjbookError::MetadataFetchFailed {
            set: set.into(),
            source: Box::new(source),
        }
    }
}

/// Alias for `Result<T, ObjbookError>`.
pub type Result<T> = std::result::Result<T, ObjbookError>;
