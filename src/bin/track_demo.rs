use bead_tracker::image::{load_frame, write_json_file};
use bead_tracker::{zlut, Frame, PositionEstimate, TrackerSession};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct TrackToolConfig {
    /// Reference images with their known heights; ignored when a saved table
    /// is found in `zlut_dir`.
    #[serde(default)]
    pub references: Vec<ReferenceConfig>,
    /// Frames to track, in sequence order.
    pub frames: Vec<PathBuf>,
    /// Directory to load a previously saved table from, or save into.
    #[serde(rename = "zlutDir")]
    pub zlut_dir: Option<PathBuf>,
    pub output: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ReferenceConfig {
    pub path: PathBuf,
    pub height: f64,
}

pub fn load_config(path: &Path) -> Result<TrackToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let frames = load_frames(&config.frames)?;
    let width = frames
        .first()
        .map(|f| f.width)
        .ok_or("Config lists no frames to track")?;

    let session = build_session(&config, width)?;
    let estimates = session.track_stack(&frames)?;

    let undefined = estimates.iter().filter(|e| e.z.is_none()).count();
    let summary = TrackingSummary {
        width,
        radius: session.radius(),
        zlut_entries: session.table().len(),
        frame_count: estimates.len(),
        undefined_heights: undefined,
        estimates,
    };
    write_json_file(&config.output, &summary)?;

    println!(
        "Tracked {} frames ({} with undefined height) -> {}",
        summary.frame_count,
        summary.undefined_heights,
        config.output.display()
    );

    Ok(())
}

fn build_session(config: &TrackToolConfig, width: usize) -> Result<TrackerSession, String> {
    if let Some(dir) = &config.zlut_dir {
        if zlut::io::table_exists(dir) {
            let table = zlut::io::load_table(dir)?;
            println!("Loaded calibration table from {}", dir.display());
            return TrackerSession::with_table(table, width);
        }
    }

    if config.references.is_empty() {
        return Err("No saved calibration table and no reference images in config".into());
    }
    let references = config
        .references
        .iter()
        .enumerate()
        .map(|(i, r)| load_frame(&r.path, i as u64).map(|frame| (frame, r.height)))
        .collect::<Result<Vec<_>, _>>()?;
    let session = TrackerSession::calibrate(references, width)?;

    if let Some(dir) = &config.zlut_dir {
        zlut::io::save_table(session.table(), dir)?;
        println!("Saved calibration table to {}", dir.display());
    }
    Ok(session)
}

fn load_frames(paths: &[PathBuf]) -> Result<Vec<Frame>, String> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| load_frame(path, i as u64))
        .collect()
}

fn usage() -> String {
    "Usage: track_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackingSummary {
    width: usize,
    radius: usize,
    zlut_entries: usize,
    frame_count: usize,
    undefined_heights: usize,
    estimates: Vec<PositionEstimate>,
}
