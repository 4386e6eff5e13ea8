//! Least-squares quadratic fitting over small point sets.
//!
//! Both localization stages use this: the autocorrelation peak is refined with
//! a fit over up to 7 samples, and the height lookup fits 5 ZLUT difference
//! values. The normal equations are solved directly with a 3×3 LU
//! decomposition; the point sets are tiny, so conditioning is not a concern
//! beyond the singular case.

use nalgebra::{Matrix3, Vector3};

/// Leading coefficients below this are treated as degenerate (no curvature).
const EPS: f64 = 1e-9;

/// Coefficients of `y = a0 + a1·x + a2·x²`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quadratic {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

impl Quadratic {
    /// x-coordinate of the extremum `-a1 / (2·a2)`.
    ///
    /// `None` when the parabola degenerates to a line.
    pub fn vertex(&self) -> Option<f64> {
        if self.a2.abs() <= EPS {
            return None;
        }
        Some(-self.a1 / (2.0 * self.a2))
    }

    /// Whether the parabola opens upward (a single well).
    pub fn opens_upward(&self) -> bool {
        self.a2 > 0.0
    }
}

/// Fit `y = a0 + a1·x + a2·x²` to the given samples by least squares.
///
/// Requires at least three samples; returns `None` when the system is
/// under-determined or singular (all x equal, collinear degeneracies).
pub fn fit_quadratic(xs: &[f64], ys: &[f64]) -> Option<Quadratic> {
    debug_assert_eq!(xs.len(), ys.len());
    if xs.len() < 3 {
        return None;
    }

    let n = xs.len() as f64;
    let mut sx = 0.0;
    let mut sx2 = 0.0;
    let mut sx3 = 0.0;
    let mut sx4 = 0.0;
    let mut sy = 0.0;
    let mut sxy = 0.0;
    let mut sx2y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let x2 = x * x;
        sx += x;
        sx2 += x2;
        sx3 += x2 * x;
        sx4 += x2 * x2;
        sy += y;
        sxy += x * y;
        sx2y += x2 * y;
    }

    let lhs = Matrix3::new(n, sx, sx2, sx, sx2, sx3, sx2, sx3, sx4);
    let rhs = Vector3::new(sy, sxy, sx2y);
    let sol = lhs.lu().solve(&rhs)?;
    Some(Quadratic {
        a0: sol[0],
        a1: sol[1],
        a2: sol[2],
    })
}
