//! I/O helpers for frames and JSON.
//!
//! - `load_frame`: read a PNG/JPEG/etc. into a square f32 frame.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::Frame;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to grayscale f32 and wrap as a [`Frame`].
///
/// Fails when the image is not square; the core requires `width == height`.
pub fn load_frame(path: &Path, index: u64) -> Result<Frame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data: Vec<f32> = img.into_raw().iter().map(|&v| v as f32).collect();
    Frame::from_pixels(width, height, data, index)
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
