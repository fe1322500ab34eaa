//! A Mixed-Integer Linear Program solver: a revised primal/dual Simplex
//! engine as the continuous-relaxation oracle, driven by a depth-first
//! Branch-and-Bound search to enforce integrality.
//!
//! [`Problem::from_stream`] loads an instance, [`Problem::solve`] dispatches
//! to either a single continuous relaxation or the full [`bnb`] search,
//! depending on whether any declared variable is integer-typed.

pub mod bnb;
pub mod config;
pub mod error;
pub mod linalg;
pub mod problem;
pub mod report;
pub mod simplex;
pub mod solution;
pub mod variable;

pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use problem::{Problem, Sense};
pub use solution::Solution;
