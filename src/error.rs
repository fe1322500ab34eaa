//! Error handling for the MILP solver.
//!
//! This module provides the error taxonomy for all failure modes that can occur
//! during model loading, continuous relaxation, and branch-and-bound search. All
//! public solver methods return `Result<T, SolverError>` for consistent error
//! handling.
//!
//! # Error Categories
//!
//! - **Usage**: the CLI was invoked incorrectly.
//! - **Parse**: the input stream did not describe a well-formed instance.
//! - **Infeasible**: Phase-I proved the constraint system has no feasible point.
//! - **Numeric**: a basis matrix became singular during LU factorization.
//! - **IterationLimit**: the safety cap on Simplex pivots was reached.
//!
//! Unboundedness is *not* an error: it is reported on the [`crate::solution::Solution`]
//! record itself, since a solver that correctly detects an unbounded objective has not
//! failed.

use std::fmt;

/// Errors that can occur while loading or solving a MILP instance.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The command line was invoked with the wrong number of arguments.
    Usage {
        /// Human-readable usage message.
        message: String,
    },

    /// The input stream did not describe a well-formed instance.
    Parse {
        /// What went wrong.
        detail: String,
        /// Token index at which parsing failed, if known.
        token_index: Option<usize>,
    },

    /// Phase-I concluded that no feasible point exists: an artificial variable
    /// remained positive in the optimal basis of the auxiliary problem.
    Infeasible {
        /// Row whose artificial variable could not be driven to zero, if known.
        row: Option<usize>,
    },

    /// A basis matrix was singular (or within `singular_pivot_tol` of singular)
    /// during LU factorization. Should not occur given invariant I4, but is
    /// caught rather than trusted.
    Numeric {
        /// Description of where the singularity was detected.
        context: String,
    },

    /// The Simplex iteration cap was reached before optimality or unboundedness
    /// could be established.
    IterationLimit {
        /// The cap that was hit.
        cap: usize,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage { message } => write!(f, "usage error: {message}"),
            Self::Parse { detail, token_index } => {
                write!(f, "parse error: {detail}")?;
                if let Some(idx) = token_index {
                    write!(f, " (at token {idx})")?;
                }
                Ok(())
            }
            Self::Infeasible { row } => {
                write!(f, "infeasible")?;
                if let Some(r) = row {
                    write!(f, " (artificial variable in row {r} could not reach zero)")?;
                }
                Ok(())
            }
            Self::Numeric { context } => write!(f, "numeric failure: {context}"),
            Self::IterationLimit { cap } => {
                write!(f, "iteration limit of {cap} reached without optimality")
            }
        }
    }
}

impl std::error::Error for SolverError {}

impl SolverError {
    /// Build a [`SolverError::Usage`] from a message.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage { message: message.into() }
    }

    /// Build a [`SolverError::Parse`] without a token position.
    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse { detail: detail.into(), token_index: None }
    }

    /// Build a [`SolverError::Parse`] with the offending token index.
    pub fn parse_at(detail: impl Into<String>, token_index: usize) -> Self {
        Self::Parse { detail: detail.into(), token_index: Some(token_index) }
    }

    /// Build a [`SolverError::Infeasible`] without row context.
    pub fn infeasible() -> Self {
        Self::Infeasible { row: None }
    }

    /// Build a [`SolverError::Infeasible`] naming the offending row.
    pub fn infeasible_at_row(row: usize) -> Self {
        Self::Infeasible { row: Some(row) }
    }

    /// Build a [`SolverError::Numeric`] singular-basis failure.
    pub fn singular_basis(context: impl Into<String>) -> Self {
        Self::Numeric { context: context.into() }
    }

    /// Build a [`SolverError::IterationLimit`].
    pub fn iteration_limit(cap: usize) -> Self {
        Self::IterationLimit { cap }
    }

    /// The process exit code this error maps to, per the CLI contract.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage { .. } => 2,
            Self::Parse { .. } | Self::Numeric { .. } | Self::IterationLimit { .. } => 1,
            Self::Infeasible { .. } => 0,
        }
    }
}

/// Convenience alias for results that can fail with [`SolverError`].
pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_with_token_index() {
        let err = SolverError::parse_at("expected a number", 7);
        assert_eq!(err.to_string(), "parse error: expected a number (at token 7)");
    }

    #[test]
    fn display_infeasible_with_row() {
        let err = SolverError::infeasible_at_row(2);
        assert_eq!(
            err.to_string(),
            "infeasible (artificial variable in row 2 could not reach zero)"
        );
    }

    #[test]
    fn exit_codes_match_contract() {
        assert_eq!(SolverError::usage("bad args").exit_code(), 2);
        assert_eq!(SolverError::parse("bad token").exit_code(), 1);
        assert_eq!(SolverError::infeasible().exit_code(), 0);
        assert_eq!(SolverError::singular_basis("pivot below tol").exit_code(), 1);
        assert_eq!(SolverError::iteration_limit(5000).exit_code(), 1);
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(SolverError::infeasible());
        assert_eq!(err.to_string(), "infeasible");
    }
}
