//! Azimuthal radial-profile extraction.
//!
//! A radial profile collapses a frame into a 1D intensity-vs-distance signal
//! around a sub-pixel center: bin `i` holds the mean intensity of all pixels
//! whose rounded Euclidean distance from the center is `i`. Profiles are the
//! currency of the ZLUT: reference frames contribute one profile per known
//! height, and each tracked frame contributes a query profile.

use crate::image::Frame;
use crate::types::Point2D;

/// Mean intensity per rounded distance bin; length is `radius + 1`.
pub type RadialProfile = Vec<f32>;

/// Compute the radial profile of `frame` around `center`.
///
/// Distances are clamped into `[1, radius]`: pixels beyond `radius` fold into
/// the outermost bin, and a distance of exactly 0 is remapped to bin 1. The
/// zero-distance bin fires only when the center lands on a pixel, which varies
/// frame to frame; folding it into bin 1 keeps bin indexing comparable across
/// frames. Bin 0 therefore stays empty and reads as 0.
///
/// `radius` is a session-level constant chosen by the caller (see
/// [`crate::tracker::session_radius`]); it is passed in rather than derived so
/// every profile in a session has the same length.
pub fn radial_profile(center: Point2D, frame: &Frame, radius: usize) -> RadialProfile {
    let width = frame.width;
    let mut intensity_sum = vec![0.0f64; radius + 1];
    let mut bin_count = vec![0u32; radius + 1];

    for y in 0..width {
        let row = frame.row(y);
        for (x, &value) in row.iter().enumerate() {
            let dx = center.x - x as f64;
            let dy = center.y - y as f64;
            let rho = (dx * dx + dy * dy).sqrt().round() as usize;
            let bin = rho.clamp(1, radius);
            intensity_sum[bin] += value as f64;
            bin_count[bin] += 1;
        }
    }

    intensity_sum
        .iter()
        .zip(&bin_count)
        .map(|(&sum, &count)| {
            if count == 0 {
                0.0
            } else {
                (sum / count as f64) as f32
            }
        })
        .collect()
}
