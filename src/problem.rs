//! The canonical LP/MILP instance.
//!
//! A [`Problem`] owns the augmented tableau (`c`, `A`, `b`), the basic/
//! non-basic index partition (`B`/`N`), and a [`VariableRegistry`]. Storage is
//! pre-sized to `m + n` columns at load time (per `SolverConfig::n_max`/
//! `m_max`) so Phase-I artificials never force a reallocation. This module
//! also owns the text-stream loader: deserialization, right-hand-side
//! normalization, and initial-basis discovery.

use std::fmt;
use std::io::BufRead;

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::linalg::Matrix;
use crate::simplex;
use crate::solution::Solution;
use crate::variable::{Variable, VariableRegistry};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Minimize `c^T x`.
    Minimize,
    /// Maximize `c^T x`.
    Maximize,
}

/// A Mixed-Integer Linear Program in equality-constraint standard form.
#[derive(Debug, Clone)]
pub struct Problem {
    n: usize,
    m: usize,
    sense: Sense,
    c: Vec<f64>,
    a: Matrix,
    b: Vec<f64>,
    basic: Vec<usize>,
    nonbasic: Vec<usize>,
    vars: VariableRegistry,
    config: SolverConfig,
    p1_iter: usize,
}

impl Problem {
    /// Number of equality-constraint rows.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of structural variables (excludes any artificial columns
    /// appended beyond the originally-declared `m`).
    #[must_use]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Total number of columns currently in scope (structural + any
    /// artificials appended by Phase-I).
    #[must_use]
    pub fn total_vars(&self) -> usize {
        self.c.len()
    }

    #[must_use]
    pub fn sense(&self) -> Sense {
        self.sense
    }

    #[must_use]
    pub fn c(&self) -> &[f64] {
        &self.c
    }

    #[must_use]
    pub fn a(&self) -> &Matrix {
        &self.a
    }

    #[must_use]
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    #[must_use]
    pub fn basic(&self) -> &[usize] {
        &self.basic
    }

    #[must_use]
    pub fn nonbasic(&self) -> &[usize] {
        &self.nonbasic
    }

    #[must_use]
    pub fn vars(&self) -> &VariableRegistry {
        &self.vars
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Iterations spent in Phase-I establishing the initial basis.
    #[must_use]
    pub fn p1_iter(&self) -> usize {
        self.p1_iter
    }

    /// Parse an instance from a token stream, normalize signs, and discover
    /// an initial basis (running Phase-I if a unit-identity basis is not
    /// already present). See the module's loader contract for the exact
    /// token order.
    pub fn from_stream<R: BufRead>(reader: R, config: SolverConfig) -> SolverResult<Self> {
        let mut tokens = TokenStream::new(reader)?;

        let n = tokens.next_usize()?;
        let m = tokens.next_usize()?;
        if n > config.n_max {
            return Err(SolverError::parse(format!(
                "n = {n} exceeds the configured maximum of {}",
                config.n_max
            )));
        }
        if m > config.m_max {
            return Err(SolverError::parse(format!(
                "m = {m} exceeds the configured maximum of {}",
                config.m_max
            )));
        }

        let sense_flag = tokens.next_usize()?;
        let sense = match sense_flag {
            0 => Sense::Minimize,
            1 => Sense::Maximize,
            other => {
                return Err(SolverError::parse(format!(
                    "sense flag must be 0 or 1, got {other}"
                )));
            }
        };

        let total_cap = config.m_max + config.n_max;

        let mut c = vec![0.0; total_cap];
        for slot in c.iter_mut().take(m) {
            *slot = tokens.next_f64()?;
        }

        let mut a = Matrix::zeros(n, total_cap);
        for i in 0..n {
            for j in 0..m {
                let v = tokens.next_f64()?;
                a.set(i, j, v);
            }
        }

        let mut b = vec![0.0; n];
        for slot in b.iter_mut() {
            *slot = tokens.next_f64()?;
        }

        let mut vars = VariableRegistry::with_capacity(total_cap);
        for _ in 0..m {
            let kind = tokens.next_usize()?;
            let var = match kind {
                0 => Variable::real_positive(f64::INFINITY),
                1 => Variable::integer_positive(),
                2 => Variable::binary(),
                other => {
                    return Err(SolverError::parse(format!(
                        "variable kind must be 0, 1, or 2, got {other}"
                    )));
                }
            };
            let _ = vars.push(var);
        }

        let mut problem = Self {
            n,
            m,
            sense,
            c,
            a,
            b,
            basic: Vec::new(),
            nonbasic: Vec::new(),
            vars,
            config,
            p1_iter: 0,
        };

        problem.normalize_rhs();
        problem.find_initial_basis()?;
        Ok(problem)
    }

    /// Negate any row whose right-hand side is negative, restoring invariant
    /// `b >= 0` (I2).
    fn normalize_rhs(&mut self) {
        for i in 0..self.n {
            if self.b[i] < 0.0 {
                self.b[i] = -self.b[i];
                for j in 0..self.total_vars() {
                    let v = self.a.get(i, j);
                    self.a.set(i, j, -v);
                }
            }
        }
    }

    /// Scan for a unit-identity basis among the structural columns. Falls
    /// back to primal Phase-I (artificial variables) when none exists.
    fn find_initial_basis(&mut self) -> SolverResult<()> {
        let mut assigned_row: Vec<Option<usize>> = vec![None; self.n];
        let mut row_for_col = vec![usize::MAX; self.n];

        for j in 0..self.m {
            let mut nonzero_row = None;
            let mut is_unit = true;
            for i in 0..self.n {
                let v = self.a.get(i, j);
                if v == 1.0 {
                    if nonzero_row.is_some() {
                        is_unit = false;
                        break;
                    }
                    nonzero_row = Some(i);
                } else if v != 0.0 {
                    is_unit = false;
                    break;
                }
            }
            if is_unit {
                if let Some(i) = nonzero_row {
                    if assigned_row[i].is_none() {
                        assigned_row[i] = Some(j);
                        row_for_col[i] = j;
                    }
                }
            }
        }

        if assigned_row.iter().all(Option::is_some) {
            self.basic = row_for_col;
            self.nonbasic = (0..self.m).filter(|j| !self.basic.contains(j)).collect();
            return Ok(());
        }

        self.run_phase_one()
    }

    /// Augment with one artificial variable per row and run primal Simplex
    /// on the auxiliary feasibility problem (§4.5.3).
    fn run_phase_one(&mut self) -> SolverResult<()> {
        let m = self.m;
        let n = self.n;
        let total_cap = self.c.len();
        assert!(m + n <= total_cap, "no room for Phase-I artificials");

        let mut aux_c = vec![0.0; total_cap];
        for i in 0..n {
            self.a.set(i, m + i, 1.0);
            aux_c[m + i] = -1.0;
            let _ = self.vars.push(Variable::real_positive(f64::INFINITY));
        }

        let basic: Vec<usize> = (m..m + n).collect();
        let nonbasic: Vec<usize> = (0..m).collect();

        let aux_total = m + n;
        let outcome = simplex::primal::solve(
            &aux_c[..aux_total],
            &self.a,
            &self.b,
            basic,
            nonbasic,
            aux_total,
            &self.config,
        )?;

        // The auxiliary problem starts feasible (x_B = b >= 0 by I2) and its
        // objective is bounded above by zero, so it always terminates optimal.
        let (final_basic, final_nonbasic, x_basic, p1_iter) = match outcome {
            simplex::SimplexOutcome::Optimal { basic, nonbasic, x_basic, iterations } => {
                (basic, nonbasic, x_basic, iterations)
            }
            simplex::SimplexOutcome::Unbounded { .. } => {
                return Err(SolverError::singular_basis("Phase-I auxiliary problem reported unbounded"));
            }
        };

        self.p1_iter = p1_iter;

        for (row, &col) in final_basic.iter().enumerate() {
            if col >= m && x_basic[row] > self.config.feasibility_tol {
                return Err(SolverError::infeasible_at_row(row));
            }
        }

        self.basic = final_basic;
        self.nonbasic = final_nonbasic.into_iter().filter(|&j| j < m).collect();
        Ok(())
    }

    /// Whether any registered structural variable requires an integer value.
    #[must_use]
    pub fn is_milp(&self) -> bool {
        (0..self.m).any(|i| self.vars.is_integer(i))
    }

    /// Solve the instance: dispatches to Branch-and-Bound if any variable is
    /// integer-typed, otherwise runs primal Simplex once on the relaxation.
    pub fn solve(&mut self) -> SolverResult<Solution> {
        if self.is_milp() {
            crate::bnb::driver::solve(self)
        } else {
            self.solve_relaxation()
        }
    }

    /// Run primal Simplex on the current tableau and translate the result
    /// into a structural [`Solution`].
    pub(crate) fn solve_relaxation(&mut self) -> SolverResult<Solution> {
        let total = self.m;
        let effective_c = self.signed_cost();
        let outcome = simplex::primal::solve(
            &effective_c,
            &self.a,
            &self.b,
            self.basic.clone(),
            self.nonbasic.clone(),
            total,
            &self.config,
        )?;

        let (basic, x_basic, iters) = match outcome {
            simplex::SimplexOutcome::Optimal { basic, x_basic, iterations, .. } => {
                (basic, x_basic, iterations)
            }
            simplex::SimplexOutcome::Unbounded { iterations } => {
                let mut solution = Solution::init(self.m, true);
                solution.set_p1_iter(self.p1_iter);
                solution.set_p2_iter(iterations);
                return Ok(solution);
            }
        };

        let mut solution = Solution::init(self.m, false);
        let mut full_x = vec![0.0; total];
        for (row, &col) in basic.iter().enumerate() {
            if col < total {
                full_x[col] = x_basic[row];
            }
        }
        for j in 0..self.m {
            solution.set_x(j, full_x[j]);
        }
        self.basic = basic;

        let z_internal = crate::linalg::dot(&effective_c[..self.m], &full_x[..self.m]);
        let z = match self.sense {
            Sense::Maximize => z_internal,
            Sense::Minimize => -z_internal,
        };
        solution.set_z(z);
        solution.set_p1_iter(self.p1_iter);
        solution.set_p2_iter(iters);
        Ok(solution)
    }

    /// The cost vector as consumed internally: negated when the declared
    /// sense is Minimize so all core math can assume Maximize (Q1).
    #[must_use]
    pub(crate) fn signed_cost(&self) -> Vec<f64> {
        match self.sense {
            Sense::Maximize => self.c.clone(),
            Sense::Minimize => self.c.iter().map(|&v| -v).collect(),
        }
    }
}

impl fmt::Display for Problem {
    /// Human-readable dump of the objective, constraints, and variable kinds
    /// (§6), printed by the CLI ahead of solving.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sense = match self.sense {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        };
        write!(f, "{sense}  ")?;
        for j in 0..self.m {
            if j > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*x{}", self.c[j], j)?;
        }
        writeln!(f)?;
        writeln!(f, "subject to:")?;
        for i in 0..self.n {
            write!(f, "  ")?;
            let mut first = true;
            for j in 0..self.m {
                let v = self.a.get(i, j);
                if v == 0.0 {
                    continue;
                }
                if !first {
                    write!(f, " + ")?;
                }
                write!(f, "{v}*x{j}")?;
                first = false;
            }
            writeln!(f, " = {}", self.b[i])?;
        }
        write!(f, "variables:")?;
        for j in 0..self.m {
            let kind = match self.vars.get(j).kind {
                crate::variable::VarKind::Real => "real",
                crate::variable::VarKind::Integer => "integer",
                crate::variable::VarKind::Binary => "binary",
            };
            write!(f, " x{j}:{kind}")?;
        }
        Ok(())
    }
}

/// Whitespace-delimited token reader used by [`Problem::from_stream`].
struct TokenStream {
    tokens: std::vec::IntoIter<String>,
    index: usize,
}

impl TokenStream {
    fn new<R: BufRead>(reader: R) -> SolverResult<Self> {
        let mut tokens = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| SolverError::parse(format!("failed to read input: {e}")))?;
            tokens.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(Self { tokens: tokens.into_iter(), index: 0 })
    }

    fn next_token(&mut self) -> SolverResult<String> {
        let tok = self
            .tokens
            .next()
            .ok_or_else(|| SolverError::parse_at("unexpected end of input", self.index))?;
        self.index += 1;
        Ok(tok)
    }

    fn next_usize(&mut self) -> SolverResult<usize> {
        let idx = self.index;
        let tok = self.next_token()?;
        tok.parse::<usize>()
            .map_err(|_| SolverError::parse_at(format!("expected a non-negative integer, got '{tok}'"), idx))
    }

    fn next_f64(&mut self) -> SolverResult<f64> {
        let idx = self.index;
        let tok = self.next_token()?;
        tok.parse::<f64>()
            .map_err(|_| SolverError::parse_at(format!("expected a number, got '{tok}'"), idx))
    }
}
