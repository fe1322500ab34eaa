//! Variable registry.
//!
//! A [`Variable`] is a bound pair plus a [`VarKind`]; a [`VariableRegistry`] is
//! an ordered, pre-allocated collection of them. Capacity is fixed at
//! construction to `m_max + n_max` so that the pushes performed during Phase-I
//! (one artificial per constraint) and Branch-and-Bound (one slack/surplus per
//! branch) never reallocate — the registry lives alongside the
//! [`crate::bnb::arena::Arena`] and must never invalidate outstanding indices.

/// The domain kind of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Continuous, `x >= lb`.
    Real,
    /// Integer-valued, `x >= lb`.
    Integer,
    /// Integer-valued with `lb = 0`, `ub = 1`.
    Binary,
}

/// A single variable's bounds and kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    /// Lower bound.
    pub lb: f64,
    /// Upper bound. Integer variables use a very large finite value to stand
    /// in for `+inf` (see [`Variable::integer_positive`]).
    pub ub: f64,
    /// The variable's kind.
    pub kind: VarKind,
}

/// Upper bound used for integer variables that have no explicit bound; acts
/// as `+inf` for branching purposes while remaining a finite `f64`.
pub const INTEGER_UNBOUNDED_UB: f64 = 1.0e15;

impl Variable {
    /// A real variable with explicit bounds.
    #[must_use]
    pub fn real(lb: f64, ub: f64) -> Self {
        Self { lb, ub, kind: VarKind::Real }
    }

    /// A real, non-negative variable with no upper bound. Used for slacks,
    /// surpluses, and artificials.
    #[must_use]
    pub fn real_positive(ub: f64) -> Self {
        Self { lb: 0.0, ub, kind: VarKind::Real }
    }

    /// An integer variable bounded above by `ub`.
    #[must_use]
    pub fn integer(ub: f64) -> Self {
        Self { lb: 0.0, ub, kind: VarKind::Integer }
    }

    /// An integer variable with no meaningful upper bound.
    #[must_use]
    pub fn integer_positive() -> Self {
        Self { lb: 0.0, ub: INTEGER_UNBOUNDED_UB, kind: VarKind::Integer }
    }

    /// A binary variable: `lb = 0`, `ub = 1`.
    #[must_use]
    pub fn binary() -> Self {
        Self { lb: 0.0, ub: 1.0, kind: VarKind::Binary }
    }

    /// Whether this variable must take an integer value.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self.kind, VarKind::Integer | VarKind::Binary)
    }
}

/// An ordered, capacity-fixed collection of [`Variable`] descriptors.
#[derive(Debug, Clone)]
pub struct VariableRegistry {
    vars: Vec<Variable>,
    capacity: usize,
}

impl VariableRegistry {
    /// Create an empty registry with room for `capacity` variables.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { vars: Vec::with_capacity(capacity), capacity }
    }

    /// Append a variable. Panics if this would exceed the configured capacity,
    /// since that would signal a bookkeeping bug elsewhere (the capacity is
    /// sized up front to `m_max + n_max` precisely so this never happens in
    /// correct use).
    pub fn push(&mut self, var: Variable) -> usize {
        assert!(
            self.vars.len() < self.capacity,
            "variable registry exceeded its fixed capacity of {}",
            self.capacity
        );
        self.vars.push(var);
        self.vars.len() - 1
    }

    /// Look up variable `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> &Variable {
        &self.vars[i]
    }

    /// Current number of registered variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the registry holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The capacity fixed at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether variable `i` must take an integer value.
    #[must_use]
    pub fn is_integer(&self, i: usize) -> bool {
        self.vars[i].is_integer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_has_unit_bounds() {
        let v = Variable::binary();
        assert_eq!(v.lb, 0.0);
        assert_eq!(v.ub, 1.0);
        assert!(v.is_integer());
    }

    #[test]
    fn registry_push_and_get() {
        let mut reg = VariableRegistry::with_capacity(4);
        let i = reg.push(Variable::real(0.0, 10.0));
        assert_eq!(i, 0);
        let j = reg.push(Variable::integer_positive());
        assert_eq!(j, 1);
        assert_eq!(reg.len(), 2);
        assert!(!reg.is_integer(0));
        assert!(reg.is_integer(1));
    }

    #[test]
    #[should_panic(expected = "exceeded its fixed capacity")]
    fn registry_panics_past_capacity() {
        let mut reg = VariableRegistry::with_capacity(1);
        let _ = reg.push(Variable::real(0.0, 1.0));
        let _ = reg.push(Variable::real(0.0, 1.0));
    }
}
