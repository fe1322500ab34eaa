//! Solution record.
//!
//! Carries the optimal primal vector, objective value, unboundedness flag,
//! and Phase-I/Phase-II iteration counters produced by the Simplex engine or
//! the Branch-and-Bound driver. Only structural components of `x` are ever
//! exposed; slack, surplus, and artificial values never leak past this type.

/// Tolerance used by [`Solution::var_is_integer`] and [`Solution::is_integer`].
/// Matches the specification's single solver-wide `ε = 1e-8`.
const INTEGER_TOL: f64 = 1e-8;

/// The result of solving an LP relaxation or a full MILP.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    x: Vec<f64>,
    z: f64,
    unbounded: bool,
    p1_iter: usize,
    p2_iter: usize,
}

impl Solution {
    /// Start a new solution with `m` structural components, all zero.
    #[must_use]
    pub fn init(m: usize, unbounded: bool) -> Self {
        Self { x: vec![0.0; m], z: 0.0, unbounded, p1_iter: 0, p2_iter: 0 }
    }

    /// Value of structural component `i`.
    #[must_use]
    pub fn x(&self, i: usize) -> f64 {
        self.x[i]
    }

    /// The full structural solution vector.
    #[must_use]
    pub fn x_vec(&self) -> &[f64] {
        &self.x
    }

    /// Set structural component `i`.
    pub fn set_x(&mut self, i: usize, value: f64) {
        self.x[i] = value;
    }

    /// Replace the entire structural solution vector.
    pub fn set_x_vec(&mut self, x: Vec<f64>) {
        self.x = x;
    }

    /// The objective value.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Set the objective value.
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// Whether the objective is unbounded on the feasible region.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.unbounded
    }

    /// Mark (or un-mark) this solution as unbounded.
    pub fn set_unbounded(&mut self, unbounded: bool) {
        self.unbounded = unbounded;
    }

    /// Number of Phase-I pivots performed to reach this solution.
    #[must_use]
    pub fn p1_iter(&self) -> usize {
        self.p1_iter
    }

    /// Number of Phase-II pivots performed to reach this solution.
    #[must_use]
    pub fn p2_iter(&self) -> usize {
        self.p2_iter
    }

    /// Set the Phase-I iteration counter.
    pub fn set_p1_iter(&mut self, iter: usize) {
        self.p1_iter = iter;
    }

    /// Set the Phase-II iteration counter.
    pub fn set_p2_iter(&mut self, iter: usize) {
        self.p2_iter = iter;
    }

    /// Total pivots across both phases.
    #[must_use]
    pub fn total_iter(&self) -> usize {
        self.p1_iter + self.p2_iter
    }

    /// Whether structural component `i` is within `1e-8` of an integer.
    #[must_use]
    pub fn var_is_integer(&self, i: usize) -> bool {
        (self.x[i] - self.x[i].round()).abs() < INTEGER_TOL
    }

    /// Whether every structural component named by `integer_indices` is
    /// within `1e-8` of an integer. Callers pass the indices of
    /// integer-kind variables (see [`crate::variable::VariableRegistry`]);
    /// this type has no notion of variable kinds on its own.
    #[must_use]
    pub fn is_integer(&self, integer_indices: impl IntoIterator<Item = usize>) -> bool {
        integer_indices.into_iter().all(|i| self.var_is_integer(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_solution_is_zeroed() {
        let s = Solution::init(3, false);
        assert_eq!(s.x_vec(), &[0.0, 0.0, 0.0]);
        assert_eq!(s.z(), 0.0);
        assert!(!s.is_unbounded());
    }

    #[test]
    fn var_is_integer_within_tolerance() {
        let mut s = Solution::init(2, false);
        s.set_x(0, 3.0 + 1e-9);
        s.set_x(1, 3.5);
        assert!(s.var_is_integer(0));
        assert!(!s.var_is_integer(1));
    }

    #[test]
    fn is_integer_checks_named_indices_only() {
        let mut s = Solution::init(3, false);
        s.set_x(0, 1.0);
        s.set_x(1, 1.5); // not integer-kind, should be ignored
        s.set_x(2, 2.0);
        assert!(s.is_integer([0, 2]));
        assert!(!s.is_integer([0, 1, 2]));
    }
}
