//! Coarse centroid over absolute deviation from the frame mean.

use crate::image::Frame;

/// Integer center-of-mass estimate.
///
/// Weights are `|pixel - mean|` with 1-indexed linear coordinates, truncated
/// to integers on output; the refinement stage recovers sub-pixel precision.
/// A zero deviation sum (flat frame) substitutes the smallest positive f32 so
/// the division stays finite. Outputs are clamped into the frame so the
/// refinement slices stay in bounds.
pub(crate) fn coarse_center(frame: &Frame) -> (usize, usize) {
    let width = frame.width;
    let mean = frame.mean();

    let mut t_sum = 0.0f64;
    let mut x_sum = 0.0f64;
    let mut y_sum = 0.0f64;
    for y in 0..width {
        let row = frame.row(y);
        for (x, &value) in row.iter().enumerate() {
            let t = (value - mean).abs() as f64;
            t_sum += t;
            x_sum += (x + 1) as f64 * t;
            y_sum += (y + 1) as f64 * t;
        }
    }
    if t_sum == 0.0 {
        t_sum = f32::MIN_POSITIVE as f64;
    }

    let cx = (x_sum / t_sum) as usize;
    let cy = (y_sum / t_sum) as usize;
    (cx.min(width - 1), cy.min(width - 1))
}
