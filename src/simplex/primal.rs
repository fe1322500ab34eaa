//! Revised primal Simplex (§4.5.1): Bland's rule for both entering and
//! leaving selection, which trades a little speed for a termination
//! guarantee without a separate anti-cycling tie-break table.

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::linalg::{inverse, mat_vec, Tableau};

use super::{basis_matrix, reduced_cost, SimplexOutcome};

/// Run primal Simplex on `(c, a, b)` restricted to the first `total_vars`
/// columns, starting from the given basic/non-basic partition. `a` may be an
/// owned [`crate::linalg::Matrix`] (the continuous-relaxation path) or an
/// arena view (the Branch-and-Bound path) — anything implementing [`Tableau`].
///
/// Internally assumes a maximizing objective; callers negate `c` ahead of
/// time for a Minimize sense (Q1).
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

        // Entering: smallest-index non-basic column with a strictly
        // improving reduced cost (Bland's rule).
        let mut entering = None;
        for (pos, &j) in nonbasic.iter().enumerate() {
            if j >= total_vars {
                continue;
            }
            let r = reduced_cost(c, &basic, &inv, a, j);
            if r > config.optimality_tol {
                entering = Some(pos);
                break;
            }
        }

        let Some(enter_pos) = entering else {
            return Ok(SimplexOutcome::Optimal { basic, nonbasic, x_basic, iterations });
        };

        let q = nonbasic[enter_pos];
        let a_q = a.extract_column(q);
        let inv_a_q = mat_vec(&inv, &a_q);
        let direction: Vec<f64> = inv_a_q.iter().map(|v| -v).collect();

        // Leaving: minimum-ratio test over rows whose direction component is
        // negative; first row to achieve the minimum ratio wins ties.
        let mut leaving = None;
        let mut best_ratio = f64::INFINITY;
        for i in 0..n {
            if direction[i] < -config.feasibility_tol {
                let ratio = -x_basic[i] / direction[i];
                if ratio < best_ratio - config.feasibility_tol {
                    best_ratio = ratio;
                    leaving = Some(i);
                }
            }
        }

        let Some(leave_row) = leaving else {
            return Ok(SimplexOutcome::Unbounded { iterations });
        };

        let p = basic[leave_row];
        basic[leave_row] = q;
        nonbasic[enter_pos] = p;

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

    /// max 3x1 + 5x2 s.t. x1+s1=4, 2x2+s2=12, 3x1+2x2+s3=18 (S1, equality form).
    #[test]
    fn solves_s1_to_known_optimum() {
        let c = vec![3.0, 5.0, 0.0, 0.0, 0.0];
        let a = Matrix::from_rows(vec![
            vec![1.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 2.0, 0.0, 1.0, 0.0],
            vec![3.0, 2.0, 0.0, 0.0, 1.0],
        ]);
        let b = vec![4.0, 12.0, 18.0];
        let basic = vec![2, 3, 4];
        let nonbasic = vec![0, 1];
        let config = SolverConfig::default();

        let outcome = solve(&c, &a, &b, basic, nonbasic, 5, &config).unwrap();
        match outcome {
            SimplexOutcome::Optimal { basic, x_basic, iterations, .. } => {
                assert!(iterations <= 3);
                let mut full = vec![0.0; 5];
                for (row, &col) in basic.iter().enumerate() {
                    full[col] = x_basic[row];
                }
                assert!((full[0] - 2.0).abs() < 1e-6);
                assert!((full[1] - 6.0).abs() < 1e-6);
            }
            SimplexOutcome::Unbounded { .. } => panic!("expected optimal, got unbounded"),
        }
    }

    /// max x1 s.t. -x1+x2+s1=1, x >= 0: unbounded along x1.
    #[test]
    fn detects_unboundedness_s4() {
        let c = vec![1.0, 0.0, 0.0];
        let a = Matrix::from_rows(vec![vec![-1.0, 1.0, 1.0]]);
        let b = vec![1.0];
        let basic = vec![2];
        let nonbasic = vec![0, 1];
        let config = SolverConfig::default();

        let outcome = solve(&c, &a, &b, basic, nonbasic, 3, &config).unwrap();
        assert!(matches!(outcome, SimplexOutcome::Unbounded { .. }));
    }

    #[test]
    fn bland_rule_picks_smallest_index_on_tie() {
        // Two columns tie on reduced cost; Bland's rule must pick column 0.
        let c = vec![2.0, 2.0, 0.0];
        let a = Matrix::from_rows(vec![vec![1.0, 1.0, 1.0]]);
        let b = vec![4.0];
        let basic = vec![2];
        let nonbasic = vec![0, 1];
        let config = SolverConfig::default();

        let outcome = solve(&c, &a, &b, basic, nonbasic, 3, &config).unwrap();
        match outcome {
            SimplexOutcome::Optimal { basic, .. } => assert_eq!(basic[0], 0),
            SimplexOutcome::Unbounded { .. } => panic!("expected optimal"),
        }
    }
}
