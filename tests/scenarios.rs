//! End-to-end scenarios S1-S6, exercised through the public
//! `Problem::from_stream` + `Problem::solve` surface only.

use std::io::Cursor;

use milp_solver::{Problem, SolverConfig, SolverError};

fn solve(input: &str) -> milp_solver::Solution {
    let mut problem = Problem::from_stream(Cursor::new(input), SolverConfig::default()).unwrap();
    problem.solve().unwrap()
}

/// S1: max 3x1+5x2 s.t. x1+s1=4; 2x2+s2=12; 3x1+2x2+s3=18.
#[test]
fn s1_continuous_maximization() {
    let input = "3 5 1\n\
                 3 5 0 0 0\n\
                 1 0 1 0 0\n\
                 0 2 0 1 0\n\
                 3 2 0 0 1\n\
                 4 12 18\n\
                 0 0 0 0 0\n";
    let solution = solve(input);
    assert!((solution.z() - 36.0).abs() < 1e-6);
    assert!((solution.x(0) - 2.0).abs() < 1e-6);
    assert!((solution.x(1) - 6.0).abs() < 1e-6);
    assert!(solution.p2_iter() <= 3);
}

/// S2: same constraints as S1, minimizing -3x1-5x2 (sense symmetry, L1).
#[test]
fn s2_minimization_via_sense_symmetry() {
    let input = "3 5 0\n\
                 -3 -5 0 0 0\n\
                 1 0 1 0 0\n\
                 0 2 0 1 0\n\
                 3 2 0 0 1\n\
                 4 12 18\n\
                 0 0 0 0 0\n";
    let solution = solve(input);
    assert!((solution.z() - (-36.0)).abs() < 1e-6);
    assert!((solution.x(0) - 2.0).abs() < 1e-6);
    assert!((solution.x(1) - 6.0).abs() < 1e-6);
}

/// S3: max x1 s.t. x1+x2=1; x1+x2=2 -- no feasible point.
#[test]
fn s3_infeasible_detected_at_load() {
    let input = "2 2 1\n1 0\n1 1\n1 1\n1 2\n0 0\n";
    let err = Problem::from_stream(Cursor::new(input), SolverConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::Infeasible { .. }));
}

/// S4: max x1 s.t. -x1+x2+s1=1 -- unbounded along x1.
#[test]
fn s4_unbounded_objective() {
    let input = "1 3 1\n1 0 0\n-1 1 1\n1\n0 0 0\n";
    let solution = solve(input);
    assert!(solution.is_unbounded());
}

/// S5: 0/1 knapsack; LP relaxation is fractional so B&B must branch.
#[test]
fn s5_knapsack_requires_branching() {
    let input = "1 5 1\n\
                 8 11 6 4 0\n\
                 5 7 4 3 1\n\
                 14\n\
                 2 2 2 2 0\n";
    let solution = solve(input);
    assert!((solution.z() - 21.0).abs() < 1e-6);
    assert!(solution.is_integer([0, 1, 2, 3]));
}

/// S6: max x1+x2 s.t. x1+x2+s=5, x1,x2 integer -- LP relaxation already
/// integral (x1+x2=5 at any split), so B&B should accept the root directly.
#[test]
fn s6_integer_relaxation_needs_no_branching() {
    let input = "1 3 1\n1 1 0\n1 1 1\n5\n1 1 0\n";
    let solution = solve(input);
    assert!((solution.z() - 5.0).abs() < 1e-6);
    assert!((solution.x(0) + solution.x(1) - 5.0).abs() < 1e-6);
}
