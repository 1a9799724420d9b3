//! Rank-revealing column selection.
//!
//! Householder QR with column pivoting: at step `k` the trailing column of
//! largest remaining norm is swapped into place and annihilated below the
//! diagonal. The pivot magnitudes `|R_kk|` come out non-increasing, so a
//! relative cutoff on them reads off the numerical rank, and the pivot order
//! says which original columns span the range.

use phyz_math::DMat;
use phyz_model::ParameterBasis;

use crate::{IdentError, Result};

/// One step of the pivoted factorization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPivot {
    /// Column of the input matrix chosen at this step.
    pub column: usize,
    /// `|R_kk|`, the norm of that column orthogonal to the previous pivots.
    pub magnitude: f64,
}

/// Pivot sequence of `a`, in elimination order.
///
/// Stops early once every remaining column is exactly zero, so the result
/// has at most `min(rows, cols)` entries and none with zero magnitude.
pub fn column_pivots(a: &DMat) -> Vec<ColumnPivot> {
    let (m, n) = a.shape();
    let steps = m.min(n);
    let mut r = a.clone();
    let mut perm: Vec<usize> = (0..n).collect();
    let mut pivots = Vec::with_capacity(steps);
    let mut v = vec![0.0; m];

    for k in 0..steps {
        // Largest trailing norm; ties go to the lowest position.
        let mut best = k;
        let mut best_norm2 = -1.0;
        for j in k..n {
            let norm2: f64 = (k..m).map(|i| r[(i, j)] * r[(i, j)]).sum();
            if norm2 > best_norm2 {
                best = j;
                best_norm2 = norm2;
            }
        }
        let alpha = best_norm2.sqrt();
        if alpha == 0.0 {
            break;
        }
        if best != k {
            r.swap_columns(k, best);
            perm.swap(k, best);
        }

        // Householder vector mapping r[k.., k] onto -sign·alpha·e1.
        let sign = if r[(k, k)] >= 0.0 { 1.0 } else { -1.0 };
        for i in k..m {
            v[i] = r[(i, k)];
        }
        v[k] += sign * alpha;
        let vnorm2: f64 = (k..m).map(|i| v[i] * v[i]).sum();

        for j in k..n {
            let dot: f64 = (k..m).map(|i| v[i] * r[(i, j)]).sum();
            let s = 2.0 * dot / vnorm2;
            for i in k..m {
                r[(i, j)] -= s * v[i];
            }
        }

        log::trace!("pivot {k}: column {} |R_kk| = {alpha:e}", perm[k]);
        pivots.push(ColumnPivot {
            column: perm[k],
            magnitude: alpha,
        });
    }

    pivots
}

/// Columns of a regressor that remain identifiable at a given tolerance.
#[derive(Debug, Clone)]
pub struct ReducedRegressor {
    matrix: DMat,
    columns: Vec<usize>,
    pivots: Vec<ColumnPivot>,
    tolerance: f64,
    threshold: f64,
}

impl ReducedRegressor {
    /// The retained columns, in their original relative order.
    pub fn matrix(&self) -> &DMat {
        &self.matrix
    }

    pub fn into_matrix(self) -> DMat {
        self.matrix
    }

    /// Indices of the retained columns in the full regressor, ascending.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Full pivot sequence of the factorization, retained or not.
    pub fn pivots(&self) -> &[ColumnPivot] {
        &self.pivots
    }

    /// Relative tolerance the reduction was run with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Absolute cutoff on `|R_kk|`.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Numerical rank of the full regressor, equal to `ncols`.
    pub fn rank(&self) -> usize {
        self.columns.len()
    }

    /// Names of the retained parameters.
    pub fn parameter_names<'a>(&self, basis: &'a ParameterBasis) -> Vec<&'a str> {
        self.columns
            .iter()
            .map(|&c| basis.names()[c].as_str())
            .collect()
    }

    /// Names of the parameters that were dropped.
    pub fn dropped_names<'a>(&self, basis: &'a ParameterBasis) -> Vec<&'a str> {
        basis
            .names()
            .iter()
            .enumerate()
            .filter(|(c, _)| self.columns.binary_search(c).is_err())
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

/// Keep the columns of `full` whose pivots exceed
/// `max(tolerance, ε·max(rows, cols)) · |R_00|`.
///
/// Only the leading run of pivots above the cutoff counts; their columns are
/// selected unchanged, in ascending order.
pub fn reduce_columns(full: &DMat, tolerance: f64) -> Result<ReducedRegressor> {
    if !(tolerance >= 0.0) {
        return Err(IdentError::InvalidInput(format!(
            "tolerance must be a non-negative number, got {tolerance}"
        )));
    }

    let (m, n) = full.shape();
    let pivots = column_pivots(full);
    let relative = tolerance.max(f64::EPSILON * m.max(n) as f64);
    let threshold = pivots.first().map_or(0.0, |p| relative * p.magnitude);

    let mut columns: Vec<usize> = pivots
        .iter()
        .take_while(|p| p.magnitude > threshold)
        .map(|p| p.column)
        .collect();
    columns.sort_unstable();

    log::debug!(
        "reduced {m}x{n} regressor to {} columns (tolerance {tolerance:e}, threshold {threshold:e})",
        columns.len()
    );

    Ok(ReducedRegressor {
        matrix: full.select_columns(&columns),
        columns,
        pivots,
        tolerance,
        threshold,
    })
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix() -> impl Strategy<Value = DMat> {
        (1usize..10, 1usize..8).prop_flat_map(|(m, n)| {
            prop::collection::vec(-10.0..10.0_f64, m * n)
                .prop_map(move |data| DMat::from_row_slice(m, n, &data))
        })
    }

    proptest! {
        #[test]
        fn larger_tolerance_never_keeps_more(a in matrix(), t1 in 0.0..1.0_f64, t2 in 0.0..1.0_f64) {
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            let small = reduce_columns(&a, lo).unwrap();
            let large = reduce_columns(&a, hi).unwrap();
            prop_assert!(large.ncols() <= small.ncols());
            prop_assert!(small.ncols() <= a.nrows().min(a.ncols()));
        }

        #[test]
        fn kept_columns_are_sorted_and_unchanged(a in matrix(), tol in 0.0..0.5_f64) {
            let reduced = reduce_columns(&a, tol).unwrap();
            let cols = reduced.columns();
            prop_assert!(cols.windows(2).all(|w| w[0] < w[1]));
            for (k, &c) in cols.iter().enumerate() {
                prop_assert_eq!(reduced.matrix().column(k), a.column(c));
            }
        }
    }
}
