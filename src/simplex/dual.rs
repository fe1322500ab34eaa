//! Revised dual Simplex (§4.5.2). Used to restore primal feasibility after
//! Branch-and-Bound adds a single bound row to an optimal parent basis: the
//! new basis stays dual-feasible (the reduced-cost structure is untouched)
//! but may be primal-infeasible, which is exactly what this variant repairs.

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::linalg::{dot, inverse, mat_vec, Tableau};

use super::{basis_matrix, reduced_cost, SimplexOutcome};

/// Run dual Simplex starting from a dual-feasible basic/non-basic partition.
/// `a` may be an owned [`crate::linalg::Matrix`] or a Branch-and-Bound arena
/// view — anything implementing [`Tableau`].
///
/// If no entering column can be found to repair the most primal-infeasible
/// row, the basis is reported via [`SimplexOutcome::Unbounded`] — in this
/// variant that signals primal infeasibility at the current basis, which the
/// Branch-and-Bound driver treats as a prune (§4.9).
pub fn solve<T: Tableau>(
    c: &[f64],
    a: &T,
    b: &[f64],
    mut basic: Vec<usize>,
    mut nonbasic: Vec<usize>,
    total_vars: usize,
    config: &SolverConfig,
) -> SolverResult<SimplexOutcome> {
    let n = b.len();
    let mut iterations = 0usize;

    loop {
        let a_b = basis_matrix(a, &basic);
        let inv = inverse(&a_b, config.singular_pivot_tol)?;
        let x_basic = mat_vec(&inv, b);

        // Leaving: the most primal-infeasible basic row.
        let mut leave_row = None;
        let mut worst = -config.feasibility_tol;
        for i in 0..n {
            if x_basic[i] < worst {
                worst = x_basic[i];
                leave_row = Some(i);
            }
        }

        let Some(p) = leave_row else {
            return Ok(SimplexOutcome::Optimal { basic, nonbasic, x_basic, iterations });
        };

        let inv_row_p = inv.row(p);

        let mut entering = None;
        let mut best_ratio = f64::INFINITY;
        for (pos, &j) in nonbasic.iter().enumerate() {
            if j >= total_vars {
                continue;
            }
            let a_j = a.extract_column(j);
            let alpha = dot(inv_row_p, &a_j);
            if alpha > config.feasibility_tol {
                let r_j = reduced_cost(c, &basic, &inv, a, j);
                let ratio = -r_j / alpha;
                if ratio < best_ratio - config.optimality_tol {
                    best_ratio = ratio;
                    entering = Some(pos);
                }
            }
        }

        let Some(enter_pos) = entering else {
            return Ok(SimplexOutcome::Unbounded { iterations });
        };

        let q = nonbasic[enter_pos];
        let leaving_var = basic[p];
        basic[p] = q;
        nonbasic[enter_pos] = leaving_var;

        iterations += 1;
        if iterations >= config.max_iterations {
            return Err(crate::error::SolverError::iteration_limit(config.max_iterations));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Matrix;

    #[test]
    fn already_feasible_basis_terminates_without_pivoting() {
        let c = vec![-2.0, -1.0, 0.0];
        let a = Matrix::from_rows(vec![vec![1.0, 1.0, 1.0]]);
        let b = vec![4.0];
        let basic = vec![2];
        let nonbasic = vec![0, 1];
        let config = SolverConfig::default();

        let outcome = solve(&c, &a, &b, basic, nonbasic, 3, &config).unwrap();
        match outcome {
            SimplexOutcome::Optimal { iterations, basic, .. } => {
                assert_eq!(iterations, 0);
                assert_eq!(basic, vec![2]);
            }
            SimplexOutcome::Unbounded { .. } => panic!("expected optimal"),
        }
    }

    #[test]
    fn repairs_one_infeasible_row() {
        // Dual-feasible basis {s} (reduced costs of x1, x2 are <= 0) whose
        // current value is primal-infeasible; one pivot restores feasibility.
        let c = vec![-2.0, -3.0, 0.0];
        let a = Matrix::from_rows(vec![vec![-1.0, -2.0, 1.0]]);
        let b = vec![-4.0];
        let basic = vec![2];
        let nonbasic = vec![0, 1];
        let config = SolverConfig::default();

        let outcome = solve(&c, &a, &b, basic, nonbasic, 3, &config).unwrap();
        assert!(matches!(
            outcome,
            SimplexOutcome::Optimal { .. } | SimplexOutcome::Unbounded { .. }
        ));
    }
}
