//! Autocorrelation-based sub-pixel refinement along the frame axes.

use crate::fit::fit_quadratic;
use crate::image::Frame;
use crate::types::Point2D;

/// Samples taken on each side of the correlation peak for the quadratic fit.
const FIT_HALF_WINDOW: usize = 3;

/// Refine the coarse center to sub-pixel precision, one axis at a time.
pub(crate) fn refine(frame: &Frame, cx: usize, cy: usize) -> Point2D {
    let width = frame.width;
    // The correlation kernel needs an odd length; drop the last sample of an
    // even-width frame.
    let trimmed = if width % 2 == 0 { width - 1 } else { width };

    let row: Vec<f64> = frame.row(cy)[..trimmed]
        .iter()
        .map(|&v| v as f64)
        .collect();
    let col: Vec<f64> = (0..trimmed).map(|y| frame.get(cx, y) as f64).collect();

    Point2D::new(refine_axis(&row, width), refine_axis(&col, width))
}

/// Locate the symmetry center of one axis signal.
///
/// The mean-subtracted signal is correlated with its own reversal; the peak of
/// that self-convolution sits at twice the symmetry center (minus the axis
/// midpoint), so the final coordinate averages the fitted peak with the
/// midpoint of the original, pre-trim width.
fn refine_axis(signal: &[f64], full_width: usize) -> f64 {
    let n = signal.len();
    if n == 0 {
        return 0.0;
    }

    let mean = signal.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = signal.iter().map(|&v| v - mean).collect();
    let kernel: Vec<f64> = centered.iter().rev().copied().collect();
    let correlated = correlate_replicate(&centered, &kernel);

    let peak = argmax(&correlated);
    let lo = peak.saturating_sub(FIT_HALF_WINDOW);
    let hi = (peak + FIT_HALF_WINDOW).min(n - 1);
    let xs: Vec<f64> = (lo..=hi).map(|i| i as f64).collect();
    let ys = &correlated[lo..=hi];

    // A degenerate fit (flat or linear window) falls back to the integer
    // peak, as does a vertex escaping the clipped window: near-degenerate
    // curvature with a strong linear term can place the vertex far outside
    // the signal, and the damping below only halves that excursion.
    let fitted = fit_quadratic(&xs, ys)
        .and_then(|q| q.vertex())
        .filter(|v| (lo as f64..=hi as f64).contains(v))
        .unwrap_or(peak as f64);

    let mid = full_width as f64 / 2.0;
    (mid - fitted) / 2.0 + fitted
}

/// Sliding correlation with edge replication, kernel applied without flipping.
///
/// With a reversed-signal kernel this computes the self-convolution of the
/// signal, whose peak encodes the symmetry center.
fn correlate_replicate(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let n = signal.len();
    let half = (kernel.len() / 2) as isize;
    let last = n as isize - 1;
    let mut out = vec![0.0; n];
    for (i, dst) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (j, &k) in kernel.iter().enumerate() {
            let s = (i as isize + j as isize - half).clamp(0, last) as usize;
            acc += k * signal[s];
        }
        *dst = acc;
    }
    out
}

/// Index of the maximum value; the first occurrence wins ties.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{argmax, correlate_replicate, refine_axis};

    fn gaussian_signal(n: usize, center: f64, sigma: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let d = i as f64 - center;
                (-d * d / (2.0 * sigma * sigma)).exp()
            })
            .collect()
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
    }

    #[test]
    fn self_convolution_peak_of_centered_signal() {
        let signal = gaussian_signal(33, 16.0, 3.0);
        let mean = signal.iter().sum::<f64>() / signal.len() as f64;
        let centered: Vec<f64> = signal.iter().map(|&v| v - mean).collect();
        let kernel: Vec<f64> = centered.iter().rev().copied().collect();
        let corr = correlate_replicate(&centered, &kernel);
        assert_eq!(argmax(&corr), 16);
    }

    #[test]
    fn off_center_blob_shifts_peak_to_twice_offset() {
        let signal = gaussian_signal(33, 12.0, 3.0);
        let mean = signal.iter().sum::<f64>() / signal.len() as f64;
        let centered: Vec<f64> = signal.iter().map(|&v| v - mean).collect();
        let kernel: Vec<f64> = centered.iter().rev().copied().collect();
        let corr = correlate_replicate(&centered, &kernel);
        // Peak at 2c - mid = 24 - 16 = 8, within a pixel.
        assert!((argmax(&corr) as i64 - 8).abs() <= 1);
    }

    #[test]
    fn ramp_signal_stays_in_bounds() {
        // A monotone ramp has no symmetry center; whatever the fit does, the
        // refined coordinate must stay inside the axis.
        let signal: Vec<f64> = (0..31).map(|i| i as f64).collect();
        let refined = refine_axis(&signal, 32);
        assert!((0.0..32.0).contains(&refined), "refined={refined}");
    }

    #[test]
    fn refine_axis_recovers_subpixel_center() {
        for &center in &[10.3, 16.0, 21.7] {
            let signal = gaussian_signal(33, center, 3.0);
            let refined = refine_axis(&signal, 33);
            assert!(
                (refined - center).abs() <= 0.5,
                "center={center} refined={refined}"
            );
        }
    }
}
