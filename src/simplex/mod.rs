//! The revised Simplex engine: shared pivot scaffolding plus the primal and
//! dual variants (§4.5). Both variants share steps 1-4 and 7 of the iteration
//! (assemble the basic submatrix, invert it, form `x_B`, compute reduced
//! costs, advance the counter) and differ only in entering/leaving rules,
//! which live in [`primal`] and [`dual`] respectively.

pub mod dual;
pub mod primal;

use crate::linalg::{dot, Matrix, Tableau};

/// Extract the `n x n` basic submatrix `A_B` from the columns named by `basic`.
pub(crate) fn basis_matrix<T: Tableau>(a: &T, basic: &[usize]) -> Matrix {
    let n = basic.len();
    let mut out = Matrix::zeros(n, n);
    for (col, &j) in basic.iter().enumerate() {
        for row in 0..n {
            out.set(row, col, a.entry(row, j));
        }
    }
    out
}

/// Reduced cost of column `j`: `c_j - c_B . (A_B^-1 A_j)`.
pub(crate) fn reduced_cost<T: Tableau>(c: &[f64], basic: &[usize], inv: &Matrix, a: &T, j: usize) -> f64 {
    let a_j = a.extract_column(j);
    let inv_a_j = crate::linalg::mat_vec(inv, &a_j);
    let c_b: Vec<f64> = basic.iter().map(|&b| c[b]).collect();
    c[j] - dot(&c_b, &inv_a_j)
}

/// Outcome of a single Simplex run: either an optimal basis or a proof the
/// objective is unbounded on the feasible region.
#[derive(Debug, Clone)]
pub enum SimplexOutcome {
    /// The basis is both primal- and dual-feasible (optimal).
    Optimal {
        basic: Vec<usize>,
        nonbasic: Vec<usize>,
        x_basic: Vec<f64>,
        iterations: usize,
    },
    /// No leaving variable could be found for the chosen entering column (or,
    /// for the dual variant, no entering column restores primal feasibility):
    /// the region is unbounded (primal) or infeasible (dual, see §4.5.2).
    Unbounded { iterations: usize },
}
