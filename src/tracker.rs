//! Session-scoped tracking pipeline.
//!
//! A [`TrackerSession`] carries the two pieces of session state the pipeline
//! needs — the profiling radius and the calibration table — as an explicit
//! configuration object. Every per-frame call is a pure function of (frame,
//! session), so concurrent sessions and test harnesses never alias state.

use crate::estimate::estimate_height;
use crate::image::Frame;
use crate::localize;
use crate::profile::radial_profile;
use crate::types::PositionEstimate;
use crate::zlut::CalibrationTable;
use log::debug;

/// Profiling radius for a session on frames of the given width.
///
/// One third of the frame width, adjusted down to an even value so the radius
/// is stable across the small width perturbations different captures produce.
pub fn session_radius(width: usize) -> usize {
    let radius = width / 3;
    radius - radius % 2
}

/// One imaging session: a fixed radius plus the table built for it.
#[derive(Clone, Debug)]
pub struct TrackerSession {
    width: usize,
    radius: usize,
    table: CalibrationTable,
}

impl TrackerSession {
    /// Build a session by measuring reference frames at known heights.
    ///
    /// `width` is the frame width of the session; all reference and tracked
    /// frames must share it. The radius is derived via [`session_radius`].
    pub fn calibrate(references: Vec<(Frame, f64)>, width: usize) -> Result<Self, String> {
        let radius = session_radius(width);
        if let Some((frame, _)) = references.iter().find(|(f, _)| f.width != width) {
            return Err(format!(
                "Reference frame {} is {} px wide, session expects {width}",
                frame.index, frame.width
            ));
        }
        let table = CalibrationTable::build(&references, radius)?;
        Ok(Self {
            width,
            radius,
            table,
        })
    }

    /// Resume a session from a previously built table.
    ///
    /// The table's radius must match the radius this session's frame width
    /// implies; a stale table from a different-width session is rejected.
    pub fn with_table(table: CalibrationTable, width: usize) -> Result<Self, String> {
        let radius = session_radius(width);
        if table.radius() != radius {
            return Err(format!(
                "Calibration table radius {} does not match session radius {radius}",
                table.radius()
            ));
        }
        Ok(Self {
            width,
            radius,
            table,
        })
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// Estimate the bead's (x, y, z) in one frame.
    ///
    /// `z` is `None` for frames whose ZLUT match is unreliable; that never
    /// aborts a sequence.
    pub fn track(&self, frame: &Frame) -> Result<PositionEstimate, String> {
        if frame.width != self.width {
            return Err(format!(
                "Frame {} is {} px wide, session expects {}",
                frame.index, frame.width, self.width
            ));
        }

        let center = localize::locate(frame);
        let profile = radial_profile(center, frame, self.radius);
        let z = estimate_height(&profile, &self.table)?;
        debug!(
            "track: frame {} -> x={:.3} y={:.3} z={z:?}",
            frame.index, center.x, center.y
        );
        Ok(PositionEstimate {
            frame: frame.index,
            x: center.x,
            y: center.y,
            z,
        })
    }

    /// Track every frame of a stack, preserving input order.
    #[cfg(not(feature = "parallel"))]
    pub fn track_stack(&self, frames: &[Frame]) -> Result<Vec<PositionEstimate>, String> {
        frames.iter().map(|frame| self.track(frame)).collect()
    }

    /// Track every frame of a stack, preserving input order.
    ///
    /// Frames are independent, so the stack fans out across the rayon pool;
    /// each result lands in its own output slot.
    #[cfg(feature = "parallel")]
    pub fn track_stack(&self, frames: &[Frame]) -> Result<Vec<PositionEstimate>, String> {
        use rayon::prelude::*;

        frames.par_iter().map(|frame| self.track(frame)).collect()
    }
}
