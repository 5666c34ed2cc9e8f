//! Asset Loading Tests
//!
//! Tests for:
//! - OBJ parsing: authored normals, computed-normal fallback, malformed input
//! - File reader: byte and text round-trips from a directory base
//! - MeshLoader: exactly one completion per request, typed failures

use std::fs;
use std::time::{Duration, Instant};

use objbook::assets::{AssetReader, MeshLoader, MeshResult, MetadataResult, parse_obj};
use objbook::errors::ObjbookError;
use objbook::playback::{FrameRequest, MetadataRequest};

const TRIANGLE_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

const TRIANGLE_OBJ_WITH_NORMALS: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
";

fn frame_request(path: &str) -> FrameRequest {
    FrameRequest {
        generation: 1,
        seq: 1,
        set: "01".to_string(),
        frame: 0,
        path: path.to_string(),
    }
}

fn wait_for_meshes(loader: &MeshLoader) -> Vec<MeshResult> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let results: Vec<_> = loader.drain_meshes().collect();
        if !results.is_empty() {
            return results;
        }
        assert!(Instant::now() < deadline, "no mesh completion arrived");
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn wait_for_metadata(loader: &MeshLoader) -> Vec<MetadataResult> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let results: Vec<_> = loader.drain_metadata().collect();
        if !results.is_empty() {
            return results;
        }
        assert!(Instant::now() < deadline, "no metadata completion arrived");
        std::thread::sleep(Duration::from_millis(10));
    }
}

// ============================================================================
// OBJ Parsing
// ============================================================================

#[test]
fn parses_a_document_with_authored_normals() {
    let geometry = parse_obj(TRIANGLE_OBJ_WITH_NORMALS.as_bytes()).unwrap();
    assert_eq!(geometry.vertex_count(), 3);
    assert_eq!(geometry.indices(), &[0, 1, 2]);
    for n in geometry.normals() {
        assert!((n.z - 1.0).abs() < 1e-4);
    }
}

#[test]
fn computes_normals_when_the_document_has_none() {
    let geometry = parse_obj(TRIANGLE_OBJ.as_bytes()).unwrap();
    assert_eq!(geometry.vertex_count(), 3);
    assert_eq!(geometry.normals().len(), 3);
    // Counter-clockwise triangle in the XY plane faces +Z.
    for n in geometry.normals() {
        assert!((n.z - 1.0).abs() < 1e-4);
    }
}

#[test]
fn malformed_document_is_an_error() {
    assert!(parse_obj(b"v 1 2\nf nonsense").is_err());
}

// ============================================================================
// File Reader
// ============================================================================

#[test]
fn file_reader_round_trips_bytes_and_text() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("01")).unwrap();
    fs::write(dir.path().join("01/meta.txt"), "A dancing cube.\n").unwrap();

    let reader = AssetReader::from_source(dir.path().to_str().unwrap()).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();

    let bytes = runtime.block_on(reader.read_bytes("01/meta.txt")).unwrap();
    assert_eq!(bytes, b"A dancing cube.\n");

    let text = runtime.block_on(reader.read_text("01/meta.txt")).unwrap();
    assert_eq!(text, "A dancing cube.\n");
}

#[test]
fn file_reader_missing_resource_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let reader = AssetReader::from_source(dir.path().to_str().unwrap()).unwrap();
    let runtime = tokio::runtime::Runtime::new().unwrap();

    assert!(runtime.block_on(reader.read_bytes("01/frame_000.obj")).is_err());
}

// ============================================================================
// MeshLoader
// ============================================================================

#[test]
fn loader_delivers_one_completion_per_request() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("01")).unwrap();
    fs::write(dir.path().join("01/frame_000.obj"), TRIANGLE_OBJ).unwrap();

    let reader = AssetReader::from_source(dir.path().to_str().unwrap()).unwrap();
    let loader = MeshLoader::new(reader).unwrap();

    loader.spawn_frame(frame_request("01/frame_000.obj"));
    let mut results = wait_for_meshes(&loader);
    assert_eq!(results.len(), 1);

    let result = results.remove(0);
    assert_eq!(result.request.path, "01/frame_000.obj");
    let geometry = result.result.unwrap();
    assert_eq!(geometry.vertex_count(), 3);

    // Nothing else shows up afterwards.
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(loader.drain_meshes().count(), 0);
}

#[test]
fn loader_reports_a_typed_mesh_failure() {
    let dir = tempfile::tempdir().unwrap();
    let reader = AssetReader::from_source(dir.path().to_str().unwrap()).unwrap();
    let loader = MeshLoader::new(reader).unwrap();

    loader.spawn_frame(frame_request("01/frame_042.obj"));
    let mut results = wait_for_meshes(&loader);
    let result = results.remove(0);

    match result.result {
        Err(ObjbookError::MeshLoadFailed { path, .. }) => {
            assert_eq!(path, "01/frame_042.obj");
        }
        other => panic!("expected MeshLoadFailed, got {other:?}"),
    }
}

#[test]
fn loader_fetches_metadata_text() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("02")).unwrap();
    fs::write(dir.path().join("02/meta.txt"), "Set two\n").unwrap();

    let reader = AssetReader::from_source(dir.path().to_str().unwrap()).unwrap();
    let loader = MeshLoader::new(reader).unwrap();

    loader.spawn_metadata(MetadataRequest {
        generation: 1,
        set: "02".to_string(),
        path: "02/meta.txt".to_string(),
    });
    let mut results = wait_for_metadata(&loader);
    let result = results.remove(0);
    assert_eq!(result.set, "02");
    assert_eq!(result.result.unwrap(), "Set two\n");
}

#[test]
fn loader_reports_a_typed_metadata_failure() {
    let dir = tempfile::tempdir().unwrap();
    let reader = AssetReader::from_source(dir.path().to_str().unwrap()).unwrap();
    let loader = MeshLoader::new(reader).unwrap();

    loader.spawn_metadata(MetadataRequest {
        generation: 1,
        set: "02".to_string(),
        path: "02/meta.txt".to_string(),
    });
    let mut results = wait_for_metadata(&loader);
    match results.remove(0).result {
        Err(ObjbookError::MetadataFetchFailed { set, .. }) => assert_eq!(set, "02"),
        other => panic!("expected MetadataFetchFailed, got {other:?}"),
    }
}
