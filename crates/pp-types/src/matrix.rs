//! Dense numeric containers shared by recommenders and scalers.

use serde::{Deserialize, Serialize};

use crate::errors::{PpError, PpResult};

/// Row-major dense `f64` table with a fixed column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from a flat row-major buffer.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> PpResult<Self> {
        let needed = element_count(&[rows, cols])?;
        if needed != data.len() {
            return Err(PpError::Validation(format!(
                "matrix of shape {rows}x{cols} needs {needed} values, got {}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from rows. Every row must have the same width.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> PpResult<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(PpError::Validation(format!(
                    "row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Single-column matrix, e.g. one target per observation.
    pub fn column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, and a zero-width matrix has no meaningful rows
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Per-column minimum. Empty for a matrix without rows.
    pub fn column_min(&self) -> Vec<f64> {
        self.fold_columns(f64::INFINITY, f64::min)
    }

    /// Per-column maximum. Empty for a matrix without rows.
    pub fn column_max(&self) -> Vec<f64> {
        self.fold_columns(f64::NEG_INFINITY, f64::max)
    }

    /// Per-column arithmetic mean. Empty for a matrix without rows.
    pub fn column_mean(&self) -> Vec<f64> {
        if self.rows == 0 {
            return Vec::new();
        }
        let n = self.rows as f64;
        self.fold_columns(0.0, |acc, v| acc + v)
            .into_iter()
            .map(|sum| sum / n)
            .collect()
    }

    /// Per-column population standard deviation (divides by `n`).
    pub fn column_std(&self) -> Vec<f64> {
        if self.rows == 0 {
            return Vec::new();
        }
        let mean = self.column_mean();
        let n = self.rows as f64;
        let mut sq = vec![0.0; self.cols];
        for row in self.row_iter() {
            for (j, v) in row.iter().enumerate() {
                let d = v - mean[j];
                sq[j] += d * d;
            }
        }
        sq.into_iter().map(|s| (s / n).sqrt()).collect()
    }

    /// Apply `f(column, value)` to every element, producing a new matrix of the
    /// same shape.
    pub fn map_columns(&self, f: impl Fn(usize, f64) -> f64) -> Self {
        let cols = self.cols.max(1);
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| f(i % cols, *v))
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    fn fold_columns(&self, init: f64, f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
        if self.rows == 0 {
            return Vec::new();
        }
        let mut acc = vec![init; self.cols];
        for row in self.row_iter() {
            for (j, v) in row.iter().enumerate() {
                acc[j] = f(acc[j], *v);
            }
        }
        acc
    }
}

/// Product of a shape's extents, or a validation error if it overflows.
fn element_count(shape: &[usize]) -> PpResult<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
        .ok_or_else(|| PpError::Validation(format!("shape {shape:?} is too large")))
}

/// Dense `(batch, group, dim)` array handed to scoring functions.
///
/// Each of the `batch` elements is a group of `group` candidates that would be
/// run in parallel; the scoring function returns one score per element.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateBatch {
    batch: usize,
    group: usize,
    dim: usize,
    data: Vec<f64>,
}

impl CandidateBatch {
    pub fn new(batch: usize, group: usize, dim: usize, data: Vec<f64>) -> PpResult<Self> {
        let needed = element_count(&[batch, group, dim])?;
        if needed != data.len() {
            return Err(PpError::Validation(format!(
                "batch of shape ({batch}, {group}, {dim}) needs {needed} values, got {}",
                data.len()
            )));
        }
        Ok(Self {
            batch,
            group,
            dim,
            data,
        })
    }

    /// Insert a unit group axis: `(n, D)` becomes `(n, 1, D)`.
    pub fn singleton_groups(matrix: &Matrix) -> Self {
        Self {
            batch: matrix.rows(),
            group: 1,
            dim: matrix.cols(),
            data: matrix.as_slice().to_vec(),
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.batch, self.group, self.dim)
    }

    pub fn batch_size(&self) -> usize {
        self.batch
    }

    pub fn group_size(&self) -> usize {
        self.group
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Feature vectors of one batch element, `group * dim` values.
    pub fn element(&self, index: usize) -> Option<&[f64]> {
        if index >= self.batch {
            return None;
        }
        let width = self.group * self.dim;
        let start = index * width;
        Some(&self.data[start..start + width])
    }

    /// A single feature vector inside a batch element.
    pub fn point(&self, index: usize, member: usize) -> Option<&[f64]> {
        if member >= self.group {
            return None;
        }
        let element = self.element(index)?;
        let start = member * self.dim;
        Some(&element[start..start + self.dim])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, PpError::Validation(_)));
    }

    #[test]
    fn new_checks_buffer_length() {
        assert!(Matrix::new(2, 2, vec![1.0, 2.0, 3.0]).is_err());
        assert!(Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).is_ok());
    }

    #[test]
    fn oversized_shapes_are_rejected() {
        assert!(matches!(
            Matrix::new(usize::MAX, 2, Vec::new()),
            Err(PpError::Validation(_))
        ));
        assert!(matches!(
            CandidateBatch::new(usize::MAX, 2, 2, Vec::new()),
            Err(PpError::Validation(_))
        ));
        assert!(CandidateBatch::new(2, 1, 3, vec![0.0; 6]).is_ok());
    }

    #[test]
    fn column_statistics() {
        let m = Matrix::from_rows(&[[0.0, 2.0], [10.0, 4.0], [5.0, 6.0]]).unwrap();
        assert_eq!(m.column_min(), vec![0.0, 2.0]);
        assert_eq!(m.column_max(), vec![10.0, 6.0]);
        assert_eq!(m.column_mean(), vec![5.0, 4.0]);

        let std = m.column_std();
        assert!((std[1] - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn statistics_of_empty_matrix_are_empty() {
        let m = Matrix::new(0, 3, Vec::new()).unwrap();
        assert!(m.column_min().is_empty());
        assert!(m.column_std().is_empty());
        assert_eq!(m.row_iter().count(), 0);
    }

    #[test]
    fn map_columns_sees_column_index() {
        let m = Matrix::from_rows(&[[1.0, 1.0], [2.0, 2.0]]).unwrap();
        let shifted = m.map_columns(|j, v| v + j as f64 * 10.0);
        assert_eq!(shifted.as_slice(), &[1.0, 11.0, 2.0, 12.0]);
    }

    #[test]
    fn singleton_groups_unsqueezes() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let batch = CandidateBatch::singleton_groups(&m);
        assert_eq!(batch.shape(), (3, 1, 2));
        assert_eq!(batch.point(1, 0), Some(&[3.0, 4.0][..]));
        assert_eq!(batch.point(1, 1), None);
        assert_eq!(batch.element(3), None);
    }
}
