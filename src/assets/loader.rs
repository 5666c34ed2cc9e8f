//! Async frame and metadata loading.
//!
//! The loader owns a tokio runtime; fetch-and-parse work runs there while
//! the render loop keeps ticking. Completions come back over flume channels
//! drained on the main thread each tick, which is the only place scene and
//! playback state are touched, so no locks are needed.

use flume::{Receiver, Sender};
use tokio::runtime::Runtime;

use crate::assets::obj_loader::parse_obj;
use crate::assets::reader::AssetReader;
use crate::errors::{ObjbookError, Result};
use crate::playback::{FrameRequest, MetadataRequest};
use crate::resources::Geometry;

/// Completion of one frame load. Exactly one is delivered per request, in
/// completion order, which is not necessarily issue order.
pub struct MeshResult {
    pub request: FrameRequest,
    pub result: Result<Geometry>,
}

/// Completion of one metadata fetch.
pub struct MetadataResult {
    pub generation: u64,
    pub set: String,
    pub result: Result<String>,
}

/// Background loader for mesh frames and set metadata.
pub struct MeshLoader {
    reader: AssetReader,
    runtime: Runtime,
    mesh_tx: Sender<MeshResult>,
    mesh_rx: Receiver<MeshResult>,
    meta_tx: Sender<MetadataResult>,
    meta_rx: Receiver<MetadataResult>,
}

impl MeshLoader {
    pub fn new(reader: AssetReader) -> Result<Self> {
        let runtime = Runtime::new()?;
        let (mesh_tx, mesh_rx) = flume::unbounded();
        let (meta_tx, meta_rx) = flume::unbounded();
        Ok(Self {
            reader,
            runtime,
            mesh_tx,
            mesh_rx,
            meta_tx,
            meta_rx,
        })
    }

    /// Fetches and parses one frame in the background.
    ///
    /// There is no cancellation: a request outlived by its session still
    /// completes and is filtered out by the session's staleness check.
    pub fn spawn_frame(&self, request: FrameRequest) {
        let reader = self.reader.clone();
        let tx = self.mesh_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch_frame(&reader, &request.path)
                .await
                .map_err(|err| ObjbookError::mesh_load(request.path.clone(), err));
            // A closed channel means the app is shutting down.
            let _ = tx.send(MeshResult { request, result });
        });
    }

    /// Fetches a set's descriptive metadata in the background.
    pub fn spawn_metadata(&self, request: MetadataRequest) {
        let reader = self.reader.clone();
        let tx = self.meta_tx.clone();
        self.runtime.spawn(async move {
            let result = reader
                .read_text(&request.path)
                .await
                .map_err(|err| ObjbookError::metadata_fetch(request.set.clone(), err));
            let _ = tx.send(MetadataResult {
                generation: request.generation,
                set: request.set,
                result,
            });
        });
    }

    /// Mesh completions that have arrived since the last drain.
    pub fn drain_meshes(&self) -> impl Iterator<Item = MeshResult> + '_ {
        self.mesh_rx.try_iter()
    }

    /// Metadata completions that have arrived since the last drain.
    pub fn drain_metadata(&self) -> impl Iterator<Item = MetadataResult> + '_ {
        self.meta_rx.try_iter()
    }
}

async fn fetch_frame(reader: &AssetReader, path: &str) -> Result<Geometry> {
    let bytes = reader.read_bytes(path).await?;
    parse_obj(&bytes)
}
