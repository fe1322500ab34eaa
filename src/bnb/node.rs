//! A Branch-and-Bound node: a cursor into the arena, not an owner of it.
//!
//! `Node` carries no borrowed views — so it can live in a
//! `Vec<Node>`-backed [`crate::bnb::stack::Stack`] without fighting the
//! borrow checker — but it is no longer a plain `Copy` handle: it also
//! carries its parent's solved basis (see below), which is a `Vec<usize>`.
//!
//! A subtlety the specification's "a node owns no heap, it indexes into the
//! arena" framing glosses over: two sibling children are appended at the
//! *same* arena row (their parent's `n`), one after the other, and the stack
//! can hold a node whose sibling's subtree is explored — and overwrites that
//! row many times over — before the node itself is popped. A `Branch` node
//! therefore does not trust the arena to still hold its row; it remembers
//! the three numbers that produced that row (`branch_var`, `bound`,
//! `direction`) and replays them via [`Node::materialize`] immediately before
//! it is used. Replaying is safe because nothing below a node's own creation
//! row is ever touched by a sibling or descendant of a *different* branch —
//! only rows at or above a node's own `parent_n` are ever written by its own
//! subtree.
//!
//! The same row-reuse hazard applies to the arena's basic-index block, and
//! worse: a pivot can reassign which column is basic in an *earlier* row, so
//! even restricting a write to "my own row" is not enough to make the
//! arena's shared `B`-block a safe channel for handing a solved basis from
//! parent to child. `Node::Branch` therefore carries the parent's solved
//! basis directly (`parent_basic`) instead of reading it back out of the
//! arena; see [`Node::warm_start_basic`].

use crate::bnb::arena::Arena;

/// Which side of a fractional value a branch tightens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `x_j <= floor(bound)`, enforced via a `+1` slack column.
    Upper,
    /// `x_j >= ceil(bound)`, enforced via a `-1` surplus column.
    Lower,
}

/// A cursor into the arena. The root indexes a block that is never
/// overwritten by branching (Branch-and-Bound only ever appends at or past
/// `n_root`), so it carries its dimensions directly. Every other node
/// remembers how to recreate its own appended row rather than trusting the
/// arena to still hold it, and carries the parent's own solved basis so
/// dual Simplex can warm-start from it (§4.9.c/d) regardless of what other
/// subtrees have done to the arena since the parent was solved.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The initial relaxation, dimensions fixed at search start.
    Root { n: usize, m: usize },
    /// A node produced by branching `parent` on `branch_var` at `bound`.
    /// `parent_basic` is the parent's own optimal basis (length `parent_n`),
    /// captured at the moment the parent was solved.
    Branch {
        parent_n: usize,
        parent_m: usize,
        parent_basic: Vec<usize>,
        branch_var: usize,
        bound: f64,
        direction: Direction,
    },
}

impl Node {
    /// The root node.
    #[must_use]
    pub fn init_root(n: usize, m: usize) -> Self {
        Self::Root { n, m }
    }

    /// Current row count.
    #[must_use]
    pub fn n(&self) -> usize {
        match self {
            Self::Root { n, .. } => *n,
            Self::Branch { parent_n, .. } => parent_n + 1,
        }
    }

    /// Current column count.
    #[must_use]
    pub fn m(&self) -> usize {
        match self {
            Self::Root { m, .. } => *m,
            Self::Branch { parent_m, .. } => parent_m + 1,
        }
    }

    /// Dimensions this node would be branched from (itself, for the root).
    #[must_use]
    pub fn as_parent_dims(&self) -> (usize, usize) {
        (self.n(), self.m())
    }

    /// Describe a child of a node with dimensions `(parent_n, parent_m)` and
    /// solved basis `parent_basic`, imposing `x_branch_var <= floor(bound)`
    /// (`Direction::Upper`) or `x_branch_var >= ceil(bound)`
    /// (`Direction::Lower`). Does not touch the arena or variable registry;
    /// see [`Node::materialize`].
    #[must_use]
    pub fn child(
        parent_n: usize,
        parent_m: usize,
        parent_basic: Vec<usize>,
        branch_var: usize,
        bound: f64,
        direction: Direction,
    ) -> Self {
        Self::Branch { parent_n, parent_m, parent_basic, branch_var, bound, direction }
    }

    /// (Re-)write this node's own appended row into the arena: column
    /// `branch_var` gets a `1`, the new slack/surplus column gets `+1`/`-1`,
    /// the new basic-index entry is set to the new column, and its cost is
    /// zero. A no-op for the root, whose block is populated once via
    /// [`Arena::copy_problem`] and never invalidated.
    pub fn materialize(&self, arena: &mut Arena) {
        let Self::Branch { parent_n, parent_m, branch_var, bound, direction, .. } = self else {
            return;
        };
        let (parent_n, parent_m, branch_var, bound, direction) = (*parent_n, *parent_m, *branch_var, *bound, *direction);
        arena.set_entry(parent_n, branch_var, 1.0);
        let (coeff, rhs) = match direction {
            Direction::Upper => (1.0, bound.floor()),
            Direction::Lower => (-1.0, bound.ceil()),
        };
        arena.set_entry(parent_n, parent_m, coeff);
        arena.set_b(parent_n, rhs);
        arena.set_basic(parent_n, parent_m);
        arena.set_cost(parent_m, 0.0);
    }

    /// The basic-index partition this node warm-starts dual Simplex from:
    /// the parent's own solved basis with one new entry appended for this
    /// node's own slack/surplus column. Appending a single bound row to an
    /// optimal basis preserves dual feasibility (§4.9.c), so this is always
    /// a valid warm start no matter what other subtrees have done to the
    /// arena's shared basic-index block since the parent was solved.
    ///
    /// # Panics
    ///
    /// Panics for the root, which warm-starts from the loaded problem's own
    /// basis rather than a parent's; the search driver never calls this on
    /// a `Root` node.
    #[must_use]
    pub fn warm_start_basic(&self) -> Vec<usize> {
        let Self::Branch { parent_basic, parent_m, .. } = self else {
            panic!("Node::warm_start_basic called on the root, which has no parent basis");
        };
        let mut basic = parent_basic.clone();
        basic.push(*parent_m);
        basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::Tableau;

    #[test]
    fn root_has_no_parent_replay() {
        let root = Node::init_root(3, 2);
        assert_eq!(root.n(), 3);
        assert_eq!(root.m(), 2);
        let mut arena = Arena::init(10, 10);
        root.materialize(&mut arena); // must not panic / must be a no-op
    }

    #[test]
    fn child_dimensions_grow_by_one() {
        let child = Node::child(3, 2, vec![0, 1, 2], 0, 2.7, Direction::Upper);
        assert_eq!(child.n(), 4);
        assert_eq!(child.m(), 3);
    }

    #[test]
    fn materialize_writes_expected_row() {
        let mut arena = Arena::init(10, 10);
        let child = Node::child(3, 2, vec![0, 1, 2], 0, 2.7, Direction::Upper);
        child.materialize(&mut arena);
        let view = arena.view_a(4, 3);
        assert_eq!(view.entry(3, 0), 1.0);
        assert_eq!(view.entry(3, 2), 1.0);
        assert_eq!(arena.view_b(4)[3], 2.0);
        assert_eq!(arena.view_basic(4)[3], 2);
    }

    #[test]
    fn warm_start_basic_appends_new_slack_to_parent_basis() {
        let child = Node::child(3, 2, vec![0, 1, 2], 0, 2.7, Direction::Upper);
        assert_eq!(child.warm_start_basic(), vec![0, 1, 2, 2]);
    }

    #[test]
    #[should_panic(expected = "no parent basis")]
    fn warm_start_basic_panics_on_root() {
        let root = Node::init_root(3, 2);
        let _ = root.warm_start_basic();
    }
}
