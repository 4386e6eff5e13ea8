//! Two-stage sub-pixel bead localization.
//!
//! Stage A ([`com`]) finds a coarse integer center as the center of mass of
//! the absolute deviation from the frame mean. Working on deviations makes the
//! stage indifferent to whether the bead is brighter or darker than the
//! background and suppresses flat background near zero.
//!
//! Stage B ([`autocorr`]) extracts the pixel row and column through the coarse
//! center, self-correlates each, and refines the correlation peak with a
//! quadratic fit. The peak of the self-convolution of a signal symmetric about
//! `c` sits at `2c - mid`; averaging the fitted peak back toward the axis
//! midpoint recovers `c` at sub-pixel precision.

mod autocorr;
mod com;

use crate::image::Frame;
use crate::types::Point2D;
use log::debug;

/// Locate the bead center in a single frame at sub-pixel precision.
pub fn locate(frame: &Frame) -> Point2D {
    if frame.width == 0 {
        return Point2D::new(0.0, 0.0);
    }
    let (cx, cy) = com::coarse_center(frame);
    debug!("locate: coarse center ({cx}, {cy}) frame {}", frame.index);
    autocorr::refine(frame, cx, cy)
}
