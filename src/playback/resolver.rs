//! Frame path resolution.
//!
//! Pure string formatting; the asset reader owns the base path or URL these
//! relative paths are joined against.

/// Resolves the relative path of one frame resource.
///
/// `frame` is zero-padded to `pad` digits: `frame_path("01", 7, 3, "obj")`
/// yields `"01/frame_007.obj"`. Callers keep `frame` inside the sequence via
/// the modulo-wrap invariant; no range checking happens here.
#[must_use]
pub fn frame_path(set_id: &str, frame: u32, pad: usize, ext: &str) -> String {
    format!("{set_id}/frame_{frame:0pad$}.{ext}")
}

/// Resolves the relative path of a set's descriptive metadata resource.
#[must_use]
pub fn metadata_path(set_id: &str) -> String {
    format!("{set_id}/meta.txt")
}
