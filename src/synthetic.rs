//! Synthetic frames for tests and demos.

use crate::image::Frame;
use crate::types::Point2D;

/// Square frame holding a normalized 2D Gaussian blob.
///
/// Peak amplitude is `1 / (2π·σ²)`, matching a unit-mass blob; callers that
/// want a dark bead on a bright background can invert the pixels.
pub fn gaussian_frame(width: usize, center: Point2D, sigma: f64, index: u64) -> Frame {
    let mut frame = Frame::new(width, index);
    let sigma_sq = sigma * sigma;
    let norm = 1.0 / (2.0 * std::f64::consts::PI * sigma_sq);
    for y in 0..width {
        for x in 0..width {
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            let value = norm * (-(dx * dx + dy * dy) / (2.0 * sigma_sq)).exp();
            frame.set(x, y, value as f32);
        }
    }
    frame
}

/// Reference stack of blobs whose width varies with height.
///
/// Stands in for a defocus series: the blob's sigma grows linearly from
/// `sigma0` by `sigma_step` per height unit, so each height has a distinct
/// radial profile. Heights are `height0, height0 + 1, ...`.
pub fn defocus_series(
    width: usize,
    center: Point2D,
    height0: f64,
    count: usize,
    sigma0: f64,
    sigma_step: f64,
) -> Vec<(Frame, f64)> {
    (0..count)
        .map(|i| {
            let height = height0 + i as f64;
            let sigma = sigma0 + sigma_step * i as f64;
            (gaussian_frame(width, center, sigma, i as u64), height)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::gaussian_frame;
    use crate::types::Point2D;

    #[test]
    fn peak_sits_at_the_center_pixel() {
        let frame = gaussian_frame(33, Point2D::new(20.0, 12.0), 3.0, 0);
        let peak = frame
            .data
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak % 33, 20);
        assert_eq!(peak / 33, 12);
    }
}
