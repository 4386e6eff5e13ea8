//! Calibration table (ZLUT) mapping known heights to radial profiles.
//!
//! The table is built once per imaging session from reference frames tagged
//! with their known axial heights, then stays read-only: per-frame height
//! estimation only ever reads it. Profile length is fixed at build time by the
//! session radius; rebuilding with a different radius invalidates any
//! previously persisted table.

pub mod io;

use crate::image::Frame;
use crate::localize;
use crate::profile::{radial_profile, RadialProfile};
use log::{debug, warn};

/// One reference measurement: a radial profile at a known axial height.
#[derive(Clone, Debug)]
pub struct CalibrationEntry {
    pub height: f64,
    pub profile: RadialProfile,
}

/// Ordered, read-only set of calibration entries, ascending by height.
#[derive(Clone, Debug)]
pub struct CalibrationTable {
    entries: Vec<CalibrationEntry>,
    radius: usize,
    duplicate_heights: bool,
}

impl CalibrationTable {
    /// Build a table from reference frames and their known heights.
    ///
    /// Each frame is localized and profiled with the session `radius`, entries
    /// are sorted ascending by height, and adjacent duplicates raise a
    /// non-fatal advisory (duplicates zero the height delta used for
    /// interpolation, degrading accuracy, but the table still works).
    pub fn build(references: &[(Frame, f64)], radius: usize) -> Result<Self, String> {
        if references.is_empty() {
            return Err("Cannot build a calibration table from zero reference frames".into());
        }
        if radius == 0 {
            return Err("Calibration radius must be at least 1".into());
        }

        Self::from_entries(measure_references(references, radius))
    }

    /// Assemble a table from already-measured entries ("load points").
    ///
    /// Entries are sorted ascending by height; all profiles must share one
    /// length. This is the seam used by persistence and by callers that carry
    /// profiles over from a previous session.
    pub fn from_entries(mut entries: Vec<CalibrationEntry>) -> Result<Self, String> {
        let profile_len = match entries.first() {
            Some(e) => e.profile.len(),
            None => return Err("Calibration table needs at least one entry".into()),
        };
        if profile_len < 2 {
            return Err("Calibration profiles must have at least two bins".into());
        }
        if let Some(bad) = entries.iter().find(|e| e.profile.len() != profile_len) {
            return Err(format!(
                "Calibration profiles mix lengths: {} vs {}",
                bad.profile.len(),
                profile_len
            ));
        }

        entries.sort_by(|a, b| a.height.total_cmp(&b.height));
        let duplicate_heights = entries
            .windows(2)
            .any(|pair| pair[0].height == pair[1].height);
        if duplicate_heights {
            warn!("calibration table contains duplicate heights; Z estimates near them will be inaccurate");
        }
        debug!(
            "calibration table: {} entries, profile length {}",
            entries.len(),
            profile_len
        );

        Ok(Self {
            entries,
            radius: profile_len - 1,
            duplicate_heights,
        })
    }

    pub fn entries(&self) -> &[CalibrationEntry] {
        &self.entries
    }

    /// Session radius the profiles were built with.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Shared length of every profile in the table (`radius + 1`).
    pub fn profile_len(&self) -> usize {
        self.radius + 1
    }

    /// Advisory flag set when two entries share a height.
    pub fn duplicate_heights(&self) -> bool {
        self.duplicate_heights
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(not(feature = "parallel"))]
fn measure_references(references: &[(Frame, f64)], radius: usize) -> Vec<CalibrationEntry> {
    references
        .iter()
        .map(|(frame, height)| measure_one(frame, *height, radius))
        .collect()
}

// Localization and profiling of distinct reference frames are independent;
// only the sort-and-validate step is a join point.
#[cfg(feature = "parallel")]
fn measure_references(references: &[(Frame, f64)], radius: usize) -> Vec<CalibrationEntry> {
    use rayon::prelude::*;

    references
        .par_iter()
        .map(|(frame, height)| measure_one(frame, *height, radius))
        .collect()
}

fn measure_one(frame: &Frame, height: f64, radius: usize) -> CalibrationEntry {
    let center = localize::locate(frame);
    CalibrationEntry {
        height,
        profile: radial_profile(center, frame, radius),
    }
}
