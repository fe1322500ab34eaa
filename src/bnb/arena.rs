//! Contiguous backing store for the Branch-and-Bound tableau.
//!
//! A single [`Arena`] is allocated once per search, sized for the worst-case
//! augmented instance (`m_max + n_max` columns by `n_max` rows), and mutated
//! in place as nodes branch and revert. This is what lets sibling nodes reuse
//! their parent's matrix storage instead of each carrying a deep copy of the
//! tableau: a node only ever grows the arena by exactly one row and one
//! column, and reverting to the parent is just shrinking the recorded
//! dimensions back down (the overwritten bytes are left in place, not
//! cleared, since the next `branch` call overwrites them again).

use crate::linalg::Tableau;
use crate::problem::Problem;

/// Contiguous storage for `c`, `A`, `b`, `B` sized to the search's configured
/// maximum problem size.
#[derive(Debug, Clone)]
pub struct Arena {
    max_n: usize,
    max_m: usize,
    stride: usize,
    c: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    basic: Vec<usize>,
}

impl Arena {
    /// Allocate an arena sized for `max_n` rows and `max_m` total columns
    /// (structural plus every slack/surplus/artificial the search may add).
    #[must_use]
    pub fn init(max_n: usize, max_m: usize) -> Self {
        Self {
            max_n,
            max_m,
            stride: max_m,
            c: vec![0.0; max_m],
            a: vec![0.0; max_n * max_m],
            b: vec![0.0; max_n],
            basic: vec![0; max_n],
        }
    }

    /// Copy the root problem's structural tableau into the arena's top-left
    /// block. Only the `m` structural columns are copied: any Phase-I
    /// artificial columns are no longer referenced once an initial basis has
    /// been found (§4.5.3), and Branch-and-Bound appends its own slack/
    /// surplus columns starting right after them.
    pub fn copy_problem(&mut self, problem: &Problem) {
        let n = problem.n();
        let m = problem.m();
        let c = problem.signed_cost();
        self.c[..m].copy_from_slice(&c[..m]);
        for i in 0..n {
            for j in 0..m {
                self.set(i, j, problem.a().get(i, j));
            }
        }
        self.b[..n].copy_from_slice(problem.b());
        self.basic[..n].copy_from_slice(problem.basic());
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.stride + col
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> f64 {
        self.a[self.index(row, col)]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: f64) {
        let idx = self.index(row, col);
        self.a[idx] = value;
    }

    /// Maximum row count the arena was sized for.
    #[must_use]
    pub fn max_n(&self) -> usize {
        self.max_n
    }

    /// Maximum column count the arena was sized for.
    #[must_use]
    pub fn max_m(&self) -> usize {
        self.max_m
    }

    /// A view over the first `total_vars` cost entries.
    #[must_use]
    pub fn view_c(&self, total_vars: usize) -> &[f64] {
        &self.c[..total_vars]
    }

    /// A view over the first `n` right-hand-side entries.
    #[must_use]
    pub fn view_b(&self, n: usize) -> &[f64] {
        &self.b[..n]
    }

    /// A view over the first `n` basic-index entries.
    #[must_use]
    pub fn view_basic(&self, n: usize) -> Vec<usize> {
        self.basic[..n].to_vec()
    }

    /// A `Tableau`-implementing view over the `n x total_vars` active block
    /// of the constraint matrix.
    #[must_use]
    pub fn view_a(&self, n: usize, total_vars: usize) -> ArenaView<'_> {
        ArenaView { arena: self, n, total_vars }
    }

    /// Write a single entry of the active matrix. Used by
    /// [`crate::bnb::node::Node::branch`] to append a bound row.
    pub(crate) fn set_entry(&mut self, row: usize, col: usize, value: f64) {
        self.set(row, col, value);
    }

    /// Write a single cost entry. Used when a branch introduces a fresh
    /// slack/surplus column with zero cost (kept explicit for clarity).
    pub(crate) fn set_cost(&mut self, col: usize, value: f64) {
        self.c[col] = value;
    }

    /// Write a single right-hand-side entry.
    pub(crate) fn set_b(&mut self, row: usize, value: f64) {
        self.b[row] = value;
    }

    /// Write the basic-index entry for `row`.
    pub(crate) fn set_basic(&mut self, row: usize, var: usize) {
        self.basic[row] = var;
    }
}

/// A borrowed, dimension-limited view into an [`Arena`]'s constraint matrix.
#[derive(Debug, Clone, Copy)]
pub struct ArenaView<'a> {
    arena: &'a Arena,
    n: usize,
    total_vars: usize,
}

impl Tableau for ArenaView<'_> {
    fn n(&self) -> usize {
        self.n
    }

    fn total_vars(&self) -> usize {
        self.total_vars
    }

    fn entry(&self, row: usize, col: usize) -> f64 {
        self.arena.get(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use std::io::Cursor;

    #[test]
    fn copies_root_problem_into_arena() {
        let input = "1 2 1\n3 5\n1 1\n4\n0 0\n";
        let problem = Problem::from_stream(Cursor::new(input), SolverConfig::default()).unwrap();
        let mut arena = Arena::init(10, 10);
        arena.copy_problem(&problem);
        assert_eq!(arena.view_b(1), &[4.0]);
        let view = arena.view_a(1, 2);
        assert_eq!(view.entry(0, 0), 1.0);
        assert_eq!(view.entry(0, 1), 1.0);
    }
}
