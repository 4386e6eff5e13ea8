//! ZLUT-based height estimation.
//!
//! A query radial profile is matched against every calibration entry by L1
//! distance, then a local quadratic fit over the five difference values around
//! the best match recovers the height at sub-entry precision. L1 on raw
//! profiles is robust to the overall noise floor and cheap; the local fit
//! avoids needing a densely sampled calibration.

use crate::fit::fit_quadratic;
use crate::profile::RadialProfile;
use crate::zlut::CalibrationTable;
use log::debug;

/// Number of difference samples fed to the local quadratic fit.
const N_POINTS_QUAD_FIT: usize = 5;

/// Estimate the axial height of `query` against `table`.
///
/// Returns `Ok(None)` when the match cannot be trusted:
/// - the best match sits within two entries of either table end, so the
///   5-point window would leave the table (no extrapolation), or
/// - the fitted minimum lies outside the window it was estimated from, or
/// - the difference curve has no upward curvature at the match (the fit
///   contradicts the single-well prior).
///
/// A profile length differing from the table's is a configuration error.
pub fn estimate_height(query: &RadialProfile, table: &CalibrationTable) -> Result<Option<f64>, String> {
    if query.len() != table.profile_len() {
        return Err(format!(
            "Query profile length {} does not match calibration table length {}",
            query.len(),
            table.profile_len()
        ));
    }

    let entries = table.entries();
    let diffs: Vec<f64> = entries
        .iter()
        .map(|entry| {
            entry
                .profile
                .iter()
                .zip(query)
                .map(|(&a, &b)| (a as f64 - b as f64).abs())
                .sum()
        })
        .collect();

    // Leftmost minimum wins ties.
    let mut min_index = 0;
    for (i, &d) in diffs.iter().enumerate().skip(1) {
        if d < diffs[min_index] {
            min_index = i;
        }
    }

    let offset = N_POINTS_QUAD_FIT / 2;
    if min_index < offset || min_index + offset > entries.len() - 1 {
        debug!("estimate_height: match at entry {min_index} too close to table edge");
        return Ok(None);
    }

    // Local x-coordinates are fixed at {-2,-1,0,1,2} around the minimum, so
    // the fitted vertex is directly the sub-entry offset.
    let xs: Vec<f64> = (0..N_POINTS_QUAD_FIT)
        .map(|i| i as f64 - offset as f64)
        .collect();
    let ys = &diffs[min_index - offset..=min_index + offset];

    // The difference curve around a valid match is a single upward well; the
    // fit is rejected when the curvature comes out flat or negative.
    let b = match fit_quadratic(&xs, ys) {
        Some(q) if q.opens_upward() => match q.vertex() {
            Some(v) => v,
            None => return Ok(None),
        },
        _ => return Ok(None),
    };

    if b.abs() > offset as f64 {
        debug!("estimate_height: fitted offset {b:.3} escapes the fit window");
        return Ok(None);
    }

    let delta = entries[min_index].height - entries[min_index - 1].height;
    Ok(Some(entries[min_index].height + b * delta))
}
