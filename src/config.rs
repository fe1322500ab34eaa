//! Solver configuration.
//!
//! This module provides the [`SolverConfig`] struct, which bundles the numeric
//! tolerances, iteration cap, and problem-size limits used throughout the
//! linear-algebra kernel, the Simplex engine, and the Branch-and-Bound search.
//! Use `SolverConfig::default()` for the values fixed by the specification, or
//! build a custom configuration with the `with_*` methods.

/// Configuration for the MILP solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Tolerance below which a basic variable is treated as zero when checking
    /// primal feasibility or entering/leaving eligibility. Default: 1e-8.
    pub feasibility_tol: f64,

    /// Tolerance above which a reduced cost is treated as strictly improving.
    /// Default: 1e-8.
    pub optimality_tol: f64,

    /// Maximum number of Simplex pivots (summed across Phase-I and Phase-II)
    /// before giving up. Default: 5000.
    pub max_iterations: usize,

    /// Magnitude below which an LU pivot is treated as singular. Default: 1e-12.
    pub singular_pivot_tol: f64,

    /// Maximum number of equality constraints a problem may declare. Default: 500.
    pub n_max: usize,

    /// Maximum number of structural variables a problem may declare. Default: 500.
    pub m_max: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            feasibility_tol: 1e-8,
            optimality_tol: 1e-8,
            max_iterations: 5000,
            singular_pivot_tol: 1e-12,
            n_max: 500,
            m_max: 500,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with the specification's default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both the feasibility and optimality tolerance to the same value.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.feasibility_tol = tol;
        self.optimality_tol = tol;
        self
    }

    /// Set the feasibility tolerance.
    #[must_use]
    pub fn with_feasibility_tol(mut self, tol: f64) -> Self {
        self.feasibility_tol = tol;
        self
    }

    /// Set the optimality tolerance.
    #[must_use]
    pub fn with_optimality_tol(mut self, tol: f64) -> Self {
        self.optimality_tol = tol;
        self
    }

    /// Set the maximum number of Simplex iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the singular-pivot tolerance used by LU factorization.
    #[must_use]
    pub fn with_singular_pivot_tol(mut self, tol: f64) -> Self {
        self.singular_pivot_tol = tol;
        self
    }

    /// Set the maximum constraint and variable counts a problem may declare.
    #[must_use]
    pub fn with_size_limits(mut self, n_max: usize, m_max: usize) -> Self {
        self.n_max = n_max;
        self.m_max = m_max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_specification() {
        let config = SolverConfig::default();
        assert_eq!(config.feasibility_tol, 1e-8);
        assert_eq!(config.optimality_tol, 1e-8);
        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.singular_pivot_tol, 1e-12);
        assert_eq!(config.n_max, 500);
        assert_eq!(config.m_max, 500);
    }

    #[test]
    fn builder_methods_chain() {
        let config = SolverConfig::new()
            .with_tolerance(1e-6)
            .with_max_iterations(1000)
            .with_size_limits(50, 50);
        assert_eq!(config.feasibility_tol, 1e-6);
        assert_eq!(config.optimality_tol, 1e-6);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.n_max, 50);
        assert_eq!(config.m_max, 50);
    }
}
