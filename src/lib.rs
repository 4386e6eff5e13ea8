#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod estimate;
pub mod image;
pub mod localize;
pub mod profile;
pub mod tracker;
pub mod types;
pub mod zlut;

// Lower-level building blocks, public for tools and tests.
pub mod fit;
pub mod synthetic;

// --- High-level re-exports -------------------------------------------------

// Main entry points: session + results.
pub use crate::tracker::{session_radius, TrackerSession};
pub use crate::types::{Point2D, PositionEstimate};

// Pipeline pieces usable on their own.
pub use crate::estimate::estimate_height;
pub use crate::image::Frame;
pub use crate::localize::locate;
pub use crate::profile::{radial_profile, RadialProfile};
pub use crate::zlut::{CalibrationEntry, CalibrationTable};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::Frame;
    pub use crate::{session_radius, CalibrationTable, Point2D, PositionEstimate, TrackerSession};
}
