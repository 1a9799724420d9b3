//! Trajectory preprocessing helpers.

use std::f64::consts::PI;

use phyz_math::DMat;

use crate::{IdentError, JointTable, Result};

/// Wrap an angle in degrees to `[-180, 180)`.
pub fn wrap_to_180_deg(angle: f64) -> f64 {
    angle - 360.0 * ((angle + 180.0) / 360.0).floor()
}

/// Wrap an angle in radians to `[-x·π/2, x·π/2)`.
pub fn wrap_to_x_pi(angle: f64, x: f64) -> f64 {
    let period = x * PI;
    angle - period * ((angle + period / 2.0) / period).floor()
}

pub fn deg_to_rad(table: &JointTable) -> JointTable {
    table.map(f64::to_radians)
}

pub fn rad_to_deg(table: &JointTable) -> JointTable {
    table.map(f64::to_degrees)
}

/// Centered moving average of each column.
///
/// Samples beyond either end are mirrored, edge sample included
/// (`c b a | a b c | c b a`), so the output has the input's shape.
pub fn smooth_columns(table: &JointTable, window: usize) -> Result<JointTable> {
    if window == 0 {
        return Err(IdentError::InvalidInput(
            "smoothing window must be at least 1".into(),
        ));
    }
    let n = table.nrows() as isize;
    if n == 0 {
        return Ok(table.clone());
    }

    let lo = -((window / 2) as isize);
    let hi = (window - window / 2) as isize - 1;
    let reflect = |k: isize| -> usize {
        let k = k.rem_euclid(2 * n);
        (if k >= n { 2 * n - 1 - k } else { k }) as usize
    };

    let scale = 1.0 / window as f64;
    Ok(JointTable::from_fn(table.nrows(), table.ncols(), |i, j| {
        let i = i as isize;
        (lo..=hi)
            .map(|d| table.row(reflect(i + d))[j])
            .sum::<f64>()
            * scale
    }))
}

/// Affine map of the whole table onto `[lo, hi]` using its global extremes.
pub fn scale_table(table: &JointTable, lo: f64, hi: f64) -> Result<JointTable> {
    let (min, max) = table
        .as_slice()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(mn, mx), &v| {
            (mn.min(v), mx.max(v))
        });
    if !(max > min) {
        return Err(IdentError::InvalidInput(
            "cannot rescale an empty or constant table".into(),
        ));
    }
    Ok(table.map(|v| (hi - lo) * (v - min) / (max - min) + lo))
}

/// Clip every entry to `[lo, hi]`.
pub fn clamp_table(table: &JointTable, lo: f64, hi: f64) -> Result<JointTable> {
    if !(lo <= hi) {
        return Err(IdentError::InvalidInput(format!(
            "clamp bounds out of order: [{lo}, {hi}]"
        )));
    }
    Ok(table.map(|v| v.clamp(lo, hi)))
}

/// Exact test for `M = -Mᵀ`.
pub fn is_skew_symmetric(m: &DMat) -> bool {
    m.is_square() && *m == -m.transpose()
}
