//! Calibration-table persistence.
//!
//! The on-disk shape mirrors the format the original acquisition tooling
//! produced, so tables round-trip across sessions:
//!
//! - `zlut.csv` — `numEntries` rows of `radius + 1` comma-separated floats,
//!   profile rows stacked in height order.
//! - `heights.csv` — one line of `numEntries` integer heights,
//!   comma-separated. A trailing separator after the final value is written
//!   on save and tolerated on load.

use super::{CalibrationEntry, CalibrationTable};
use crate::image::io::ensure_parent_dir;
use std::fs;
use std::path::Path;

const PROFILES_FILE: &str = "zlut.csv";
const HEIGHTS_FILE: &str = "heights.csv";

/// Whether `dir` holds a previously saved calibration table.
pub fn table_exists(dir: &Path) -> bool {
    dir.join(PROFILES_FILE).exists() && dir.join(HEIGHTS_FILE).exists()
}

/// Save `table` into `dir` as a profile raster plus a heights line.
pub fn save_table(table: &CalibrationTable, dir: &Path) -> Result<(), String> {
    let profiles_path = dir.join(PROFILES_FILE);
    ensure_parent_dir(&profiles_path)?;

    let mut raster = String::new();
    for entry in table.entries() {
        let row: Vec<String> = entry.profile.iter().map(|v| v.to_string()).collect();
        raster.push_str(&row.join(","));
        raster.push('\n');
    }
    fs::write(&profiles_path, raster)
        .map_err(|e| format!("Failed to write {}: {e}", profiles_path.display()))?;

    let heights_path = dir.join(HEIGHTS_FILE);
    let mut line = String::new();
    for entry in table.entries() {
        line.push_str(&(entry.height.round() as i64).to_string());
        line.push(',');
    }
    line.push('\n');
    fs::write(&heights_path, line)
        .map_err(|e| format!("Failed to write {}: {e}", heights_path.display()))
}

/// Load a previously saved calibration table from `dir`.
///
/// The profile raster fixes the radius; a mismatch against the current
/// session radius is the caller's configuration error to detect via
/// [`CalibrationTable::radius`].
pub fn load_table(dir: &Path) -> Result<CalibrationTable, String> {
    let profiles_path = dir.join(PROFILES_FILE);
    let raster = fs::read_to_string(&profiles_path)
        .map_err(|e| format!("Failed to read {}: {e}", profiles_path.display()))?;

    let mut profiles: Vec<Vec<f32>> = Vec::new();
    for (lineno, line) in raster.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_separated(line)
            .map_err(|e| format!("{}:{}: {e}", profiles_path.display(), lineno + 1))?;
        profiles.push(row);
    }

    let heights_path = dir.join(HEIGHTS_FILE);
    let heights_text = fs::read_to_string(&heights_path)
        .map_err(|e| format!("Failed to read {}: {e}", heights_path.display()))?;
    let heights: Vec<f32> = parse_separated(heights_text.trim())
        .map_err(|e| format!("{}: {e}", heights_path.display()))?;

    if heights.len() != profiles.len() {
        return Err(format!(
            "Calibration table mismatch: {} heights for {} profiles",
            heights.len(),
            profiles.len()
        ));
    }

    let entries = heights
        .into_iter()
        .zip(profiles)
        .map(|(height, profile)| CalibrationEntry {
            height: height as f64,
            profile,
        })
        .collect();
    CalibrationTable::from_entries(entries)
}

/// Parse one comma-separated line of numbers, permitting a trailing separator.
fn parse_separated(line: &str) -> Result<Vec<f32>, String> {
    let mut fields: Vec<&str> = line.split(',').collect();
    if fields.last().is_some_and(|f| f.trim().is_empty()) {
        fields.pop();
    }
    fields
        .iter()
        .map(|f| {
            f.trim()
                .parse::<f32>()
                .map_err(|e| format!("bad value {f:?}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{load_table, parse_separated, save_table, table_exists};
    use crate::zlut::{CalibrationEntry, CalibrationTable};
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bead-tracker-zlut-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_table() -> CalibrationTable {
        let entries = (0..6)
            .map(|i| CalibrationEntry {
                height: 40.0 + i as f64,
                profile: (0..9).map(|j| (i * 9 + j) as f32 * 0.5).collect(),
            })
            .collect();
        CalibrationTable::from_entries(entries).unwrap()
    }

    #[test]
    fn trailing_separator_is_tolerated() {
        assert_eq!(parse_separated("1,2,3,").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_separated("1,2,3").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn malformed_field_is_an_error() {
        assert!(parse_separated("1,two,3").is_err());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = temp_dir("roundtrip");
        let table = sample_table();
        save_table(&table, &dir).unwrap();
        assert!(table_exists(&dir));

        let loaded = load_table(&dir).unwrap();
        assert_eq!(loaded.len(), table.len());
        assert_eq!(loaded.radius(), table.radius());
        for (a, b) in loaded.entries().iter().zip(table.entries()) {
            assert_eq!(a.height, b.height);
            assert_eq!(a.profile, b.profile);
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn height_profile_count_mismatch_is_rejected() {
        let dir = temp_dir("mismatch");
        let table = sample_table();
        save_table(&table, &dir).unwrap();
        std::fs::write(dir.join("heights.csv"), "40,41,\n").unwrap();
        assert!(load_table(&dir).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
