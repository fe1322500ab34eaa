//! Dense linear-algebra kernel for the Simplex engine.
//!
//! Everything the revised Simplex method needs from linear algebra lives here:
//! an owned dense row-major [`Matrix`], column/row extraction, an LU-based
//! [`inverse`], [`gemv`] (`y <- alpha*M*x + beta*y`), and [`dot`]. This is the
//! only layer where a numerical tolerance is a parameter rather than the single
//! solver-wide `ε = 1e-8`; callers pass `singular_pivot_tol` explicitly so the
//! kernel has no hidden dependency on [`crate::config::SolverConfig`].
//!
//! The [`Tableau`] trait lets the Simplex engine read reduced-cost columns
//! uniformly whether the backing storage is an owned [`Matrix`] (the
//! continuous-relaxation path) or a view into the Branch-and-Bound arena
//! (`crate::bnb::arena`).

use crate::error::SolverError;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Build a matrix from row vectors. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        if rows.is_empty() {
            return Self { rows: 0, cols: 0, data: Vec::new() };
        }
        let cols = rows[0].len();
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            debug_assert_eq!(row.len(), cols, "all rows must have the same length");
            data.extend_from_slice(row);
        }
        Self { rows: rows.len(), cols, data }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read the element at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Write the element at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// A row as a contiguous slice.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Strided copy of row `i`.
    #[must_use]
    pub fn extract_row(&self, i: usize) -> Vec<f64> {
        self.row(i).to_vec()
    }

    /// Strided copy of column `j`.
    #[must_use]
    pub fn extract_column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(r1 * self.cols + j, r2 * self.cols + j);
        }
    }
}

/// A source of matrix entries the Simplex engine can pivot over, regardless of
/// whether the backing storage is an owned [`Matrix`] or a borrowed arena view.
pub trait Tableau {
    /// Number of equality-constraint rows.
    fn n(&self) -> usize;

    /// Number of columns currently in scope (structural + slack/surplus/artificial).
    fn total_vars(&self) -> usize;

    /// Read the entry at `(row, col)`.
    fn entry(&self, row: usize, col: usize) -> f64;

    /// Strided copy of column `col`.
    fn extract_column(&self, col: usize) -> Vec<f64> {
        (0..self.n()).map(|i| self.entry(i, col)).collect()
    }
}

impl Tableau for Matrix {
    fn n(&self) -> usize {
        self.rows
    }

    fn total_vars(&self) -> usize {
        self.cols
    }

    fn entry(&self, row: usize, col: usize) -> f64 {
        self.get(row, col)
    }
}

/// `y <- alpha * m * x + beta * y`.
pub fn gemv(alpha: f64, m: &Matrix, x: &[f64], beta: f64, y: &mut [f64]) {
    debug_assert_eq!(x.len(), m.cols());
    debug_assert_eq!(y.len(), m.rows());
    for i in 0..m.rows() {
        let mut sum = 0.0;
        for j in 0..m.cols() {
            sum += m.get(i, j) * x[j];
        }
        y[i] = beta * y[i] + alpha * sum;
    }
}

/// `m * x` as a fresh vector.
#[must_use]
pub fn mat_vec(m: &Matrix, x: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; m.rows()];
    gemv(1.0, m, x, 0.0, &mut y);
    y
}

/// Dot product of two equal-length vectors.
#[must_use]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y.iter()).map(|(a, b)| a * b).sum()
}

/// Invert a square matrix via Gaussian elimination with partial pivoting,
/// solving against the identity. Fails with [`SolverError::Numeric`] if any
/// pivot's magnitude falls below `singular_pivot_tol` (invariant I4 says this
/// should never happen for a valid basis, but the kernel does not trust it).
pub fn inverse(base: &Matrix, singular_pivot_tol: f64) -> Result<Matrix, SolverError> {
    let n = base.rows();
    debug_assert_eq!(n, base.cols(), "inverse requires a square matrix");

    // Augmented [base | I], reduced to [I | base^-1] in place.
    let mut aug = Matrix::zeros(n, 2 * n);
    for i in 0..n {
        for j in 0..n {
            aug.set(i, j, base.get(i, j));
        }
        aug.set(i, n + i, 1.0);
    }

    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot_val = aug.get(k, k).abs();
        for i in (k + 1)..n {
            let val = aug.get(i, k).abs();
            if val > pivot_val {
                pivot_row = i;
                pivot_val = val;
            }
        }

        if pivot_val < singular_pivot_tol {
            return Err(SolverError::singular_basis(format!(
                "pivot magnitude {pivot_val} at column {k} below tolerance {singular_pivot_tol}"
            )));
        }

        aug.swap_rows(k, pivot_row);

        let pivot = aug.get(k, k);
        for j in 0..(2 * n) {
            let v = aug.get(k, j) / pivot;
            aug.set(k, j, v);
        }

        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = aug.get(i, k);
            if factor == 0.0 {
                continue;
            }
            for j in 0..(2 * n) {
                let v = aug.get(i, j) - factor * aug.get(k, j);
                aug.set(i, j, v);
            }
        }
    }

    let mut result = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            result.set(i, j, aug.get(i, n + j));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_of_identity_is_identity() {
        let id = Matrix::identity(3);
        let inv = inverse(&id, 1e-12).unwrap();
        assert_eq!(inv, id);
    }

    #[test]
    fn inverse_of_2x2() {
        let m = Matrix::from_rows(vec![vec![4.0, 7.0], vec![2.0, 6.0]]);
        let inv = inverse(&m, 1e-12).unwrap();
        // det = 24 - 14 = 10
        assert!((inv.get(0, 0) - 0.6).abs() < 1e-9);
        assert!((inv.get(0, 1) - (-0.7)).abs() < 1e-9);
        assert!((inv.get(1, 0) - (-0.2)).abs() < 1e-9);
        assert!((inv.get(1, 1) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn inverse_times_original_is_identity() {
        let m = Matrix::from_rows(vec![
            vec![2.0, 0.0, 1.0],
            vec![1.0, 3.0, 2.0],
            vec![0.0, 1.0, 1.0],
        ]);
        let inv = inverse(&m, 1e-12).unwrap();
        let product = {
            let mut p = Matrix::zeros(3, 3);
            for i in 0..3 {
                for j in 0..3 {
                    let mut sum = 0.0;
                    for k in 0..3 {
                        sum += m.get(i, k) * inv.get(k, j);
                    }
                    p.set(i, j, sum);
                }
            }
            p
        };
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product.get(i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn singular_matrix_fails() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(inverse(&m, 1e-12).is_err());
    }

    #[test]
    fn gemv_computes_affine_combination() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let x = vec![1.0, 1.0];
        let mut y = vec![10.0, 10.0];
        gemv(2.0, &m, &x, 1.0, &mut y);
        // 2*(1*1+2*1) + 10 = 16 ; 2*(3*1+4*1) + 10 = 24
        assert_eq!(y, vec![16.0, 24.0]);
    }

    #[test]
    fn dot_product() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    }

    #[test]
    fn extract_row_and_column() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(m.extract_row(1), vec![4.0, 5.0, 6.0]);
        assert_eq!(m.extract_column(2), vec![3.0, 6.0]);
    }
}
