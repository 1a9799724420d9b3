//! Rectangular numeric tables for trajectory data.

use phyz_math::DMat;

use crate::{IdentError, Result};

/// An N×C table of reals, one row per sample and one column per joint.
///
/// Samples are kept as the columns of a C×N matrix, so each sample is a
/// contiguous slice. The shape is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct JointTable {
    samples: DMat,
}

impl JointTable {
    /// Build from a list of rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(IdentError::ShapeMismatch(format!(
                    "row {i} has {} columns, row 0 has {ncols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            samples: DMat::from_vec(ncols, rows.len(), data),
        })
    }

    /// Build from row-major data.
    pub fn from_row_slice(nrows: usize, ncols: usize, data: &[f64]) -> Result<Self> {
        if nrows.checked_mul(ncols) != Some(data.len()) {
            return Err(IdentError::ShapeMismatch(format!(
                "{} values cannot fill a {nrows}x{ncols} table",
                data.len()
            )));
        }
        Ok(Self {
            samples: DMat::from_column_slice(ncols, nrows, data),
        })
    }

    /// Build from a function of (row, column).
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        Self {
            samples: DMat::from_fn(ncols, nrows, |j, i| f(i, j)),
        }
    }

    /// Copy a dense N×C matrix.
    pub fn from_matrix(m: &DMat) -> Self {
        Self {
            samples: m.transpose(),
        }
    }

    /// Number of samples.
    pub fn nrows(&self) -> usize {
        self.samples.ncols()
    }

    /// Number of columns (joints).
    pub fn ncols(&self) -> usize {
        self.samples.nrows()
    }

    /// `(nrows, ncols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }

    /// Row `i` as a slice.
    ///
    /// Panics if `i >= nrows`.
    pub fn row(&self, i: usize) -> &[f64] {
        let c = self.ncols();
        &self.samples.as_slice()[i * c..(i + 1) * c]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.nrows()).map(move |i| self.row(i))
    }

    /// Entry at (row, column).
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.samples.get((j, i)).copied()
    }

    /// Column `j` copied out.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.samples.row(j).iter().copied().collect()
    }

    /// All values, row-major.
    pub fn as_slice(&self) -> &[f64] {
        self.samples.as_slice()
    }

    /// Copy into a dense N×C matrix.
    pub fn to_matrix(&self) -> DMat {
        self.samples.transpose()
    }

    /// Apply `f` to every entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> JointTable {
        JointTable {
            samples: self.samples.map(f),
        }
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|x| x.is_finite())
    }
}
