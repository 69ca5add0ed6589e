//! Module `model` provides the constraint store: the single owner of
//! the variable counter, the clause set, the assumption set and the
//! gate cache. Nothing outside the store mutates engine-visible state.
/// gate memoization
mod cache;
/// defining clauses for the binary gates
mod tseitin;

use {
    self::cache::GateCache,
    crate::{
        engine::{Certificate, SatEngineIF, SolveLimits},
        types::{Bit, Literal, ModelError},
    },
    ahash::AHashSet,
    bitflags::bitflags,
};

bitflags! {
    /// solve-state flags.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    struct ModelFlag: u8 {
        /// the engine has returned a definite answer at least once.
        const SOLVED = 0b0001;
        /// the latest definite answer was satisfiable.
        const SAT    = 0b0010;
    }
}

/// Outcome of [`Model::solve`].
///
/// `Unknown` means the engine exhausted a budget; it is deliberately a
/// third state, never folded into `Unsat`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Satisfiability {
    Sat,
    Unsat,
    Unknown,
}

/// The constraint store, generic over the SAT engine behind it.
///
/// Variable 1 is reserved at construction and asserted true by a unit
/// clause; its negation is the `false` sentinel. Concrete booleans that
/// must appear in a clause resolve to these two literals.
///
/// # Examples
///
/// ```
/// use bitblast::*;
/// let mut m = Model::<SimpleEngine>::default();
/// let a = m.new_variable();
/// let b = m.new_variable();
/// let both = m.and(a, b);
/// m.assert_unit(both).unwrap();
/// assert_eq!(m.solve(), Satisfiability::Sat);
/// assert_eq!(m.value_of(a), Some(true));
/// assert_eq!(m.value_of(b), Some(true));
/// ```
#[derive(Debug)]
pub struct Model<E: SatEngineIF> {
    engine: E,
    num_vars: usize,
    /// clauses not yet flushed to the engine, deduplicated as a set.
    clauses: AHashSet<Vec<Literal>>,
    num_clauses: usize,
    assumptions: AHashSet<Literal>,
    cache: GateCache,
    status: ModelFlag,
    /// latest satisfying assignment, indexed by variable magnitude.
    assignment: Vec<bool>,
    true_lit: Literal,
}

impl<E: SatEngineIF + Default> Default for Model<E> {
    fn default() -> Self {
        Model::new(E::default())
    }
}

impl<E: SatEngineIF> Model<E> {
    /// build a store around `engine` and plant the sentinel constants.
    pub fn new(engine: E) -> Self {
        let mut model = Model {
            engine,
            num_vars: 0,
            clauses: AHashSet::new(),
            num_clauses: 0,
            assumptions: AHashSet::new(),
            cache: GateCache::default(),
            status: ModelFlag::default(),
            assignment: Vec::new(),
            true_lit: Literal::positive(1),
        };
        let t = model.new_variable();
        debug_assert_eq!(t, model.true_lit);
        model.push_clause(vec![t]);
        model
    }
    /// allocate the next free variable; O(1).
    pub fn new_variable(&mut self) -> Literal {
        let n = self.engine.add_var();
        self.num_vars += 1;
        debug_assert_eq!(n, self.num_vars);
        Literal::positive(self.num_vars)
    }
    /// the literal asserted true at construction.
    pub fn top(&self) -> Literal {
        self.true_lit
    }
    /// map a bit onto a literal, resolving concrete booleans to the
    /// sentinel constants.
    pub fn lift(&self, bit: Bit) -> Literal {
        match bit {
            Bit::Bool(true) => self.true_lit,
            Bit::Bool(false) => !self.true_lit,
            Bit::Lit(l) => l,
        }
    }
    /// validate a raw signed identifier against the declared variables.
    /// This is the one place raw integers become `Literal`s.
    pub fn lit(&self, raw: i32) -> Result<Literal, ModelError> {
        let l = Literal::try_from(raw)?;
        if self.num_vars < l.var_id() {
            return Err(ModelError::UnknownIdentifier(raw));
        }
        Ok(l)
    }
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }
    /// clauses committed so far, including ones already flushed.
    pub fn num_clauses(&self) -> usize {
        self.num_clauses
    }
    /// distinct gates encoded so far.
    pub fn num_gates(&self) -> usize {
        self.cache.len()
    }

    /// assert the disjunction of `bits`.
    pub fn assert_clause(&mut self, bits: &[Bit]) {
        let clause = bits.iter().map(|b| self.lift(*b)).collect::<Vec<_>>();
        self.push_clause(clause);
    }
    /// assert a batch of disjunctions.
    pub fn assert_clauses(&mut self, clauses: &[&[Bit]]) {
        for c in clauses.iter() {
            self.assert_clause(c);
        }
    }
    /// assert that a single bit holds.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidArgument` when `bit` is concrete: asserting
    /// a constant is a caller bug, not a constraint.
    pub fn assert_unit(&mut self, bit: impl Into<Bit>) -> Result<(), ModelError> {
        match bit.into() {
            Bit::Bool(_) => Err(ModelError::InvalidArgument),
            Bit::Lit(l) => {
                self.push_clause(vec![l]);
                Ok(())
            }
        }
    }
    /// assume a bit for subsequent solves, revocable via [`unassume`].
    /// Also asserts the tautology `(x ∨ ¬x)` so the variable is visible
    /// to the engine even if otherwise unconstrained.
    ///
    /// # Errors
    ///
    /// `ModelError::InvalidArgument` when `bit` is concrete.
    ///
    /// [`unassume`]: `Model::unassume`
    pub fn assume(&mut self, bit: impl Into<Bit>) -> Result<(), ModelError> {
        match bit.into() {
            Bit::Bool(_) => Err(ModelError::InvalidArgument),
            Bit::Lit(l) => {
                self.assumptions.insert(l);
                self.push_clause(vec![l, !l]);
                Ok(())
            }
        }
    }
    /// retract an assumption. Unknown literals are ignored.
    pub fn unassume(&mut self, l: Literal) {
        self.assumptions.remove(&l);
    }

    /// queue a pre-normalized clause. Duplicates within the pending set
    /// are dropped.
    fn push_clause(&mut self, clause: Vec<Literal>) {
        if self.clauses.insert(clause) {
            self.num_clauses += 1;
        }
    }
    fn push_clauses(&mut self, clauses: &[Vec<Literal>]) {
        for c in clauses.iter() {
            self.push_clause(c.clone());
        }
    }

    /// flush pending clauses and run the engine without budgets.
    pub fn solve(&mut self) -> Satisfiability {
        self.solve_with(&SolveLimits::default())
    }
    /// flush pending clauses and run the engine under `limits`.
    pub fn solve_with(&mut self, limits: &SolveLimits) -> Satisfiability {
        {
            let Model {
                ref mut engine,
                ref mut clauses,
                ..
            } = *self;
            for c in clauses.drain() {
                engine.add_clause(&c);
            }
        }
        let mut assumptions = self.assumptions.iter().copied().collect::<Vec<_>>();
        assumptions.sort_unstable();
        self.status = ModelFlag::default();
        match self.engine.solve(&assumptions, limits) {
            Certificate::Sat(assignment) => {
                self.assignment = assignment;
                self.status = ModelFlag::SOLVED | ModelFlag::SAT;
                Satisfiability::Sat
            }
            Certificate::Unsat => {
                self.assignment.clear();
                self.status = ModelFlag::SOLVED;
                Satisfiability::Unsat
            }
            Certificate::Unknown => {
                self.assignment.clear();
                Satisfiability::Unknown
            }
        }
    }

    /// the literal's truth value under the latest satisfying
    /// assignment; `None` while unsolved, after UNSAT, or after an
    /// engine give-up.
    pub fn value_of(&self, l: Literal) -> Option<bool> {
        if !self.status.contains(ModelFlag::SAT) {
            return None;
        }
        self.assignment
            .get(l.var_id())
            .map(|v| if l.is_positive() { *v } else { !*v })
    }
    /// like [`value_of`](`Model::value_of`), lifted to bits; concrete
    /// bits are always known.
    pub fn value(&self, bit: Bit) -> Option<bool> {
        match bit {
            Bit::Bool(b) => Some(b),
            Bit::Lit(l) => self.value_of(l),
        }
    }

    /// build a literal whose assertion forbids the current assignment
    /// of `lits`: the OR-fold of "literal differs from its value".
    /// Asserting it and re-solving enumerates the remaining solutions.
    ///
    /// # Errors
    ///
    /// * `ModelError::InvalidArgument` on an empty set.
    /// * `ModelError::UnsolvedAccess` without a satisfying assignment.
    pub fn negate_solution(&mut self, lits: &[Literal]) -> Result<Literal, ModelError> {
        if lits.is_empty() {
            return Err(ModelError::InvalidArgument);
        }
        // read every value before touching the store so a failure
        // leaves no partial gates behind
        let values = lits
            .iter()
            .map(|l| self.value_of(*l).ok_or(ModelError::UnsolvedAccess))
            .collect::<Result<Vec<_>, _>>()?;
        let mut acc: Option<Bit> = None;
        for (l, v) in lits.iter().zip(values.into_iter()) {
            let differs = self.ne(*l, v);
            acc = Some(match acc {
                None => differs,
                Some(a) => self.or(a, differs),
            });
        }
        match acc {
            Some(Bit::Lit(l)) => Ok(l),
            _ => Err(ModelError::InvalidArgument),
        }
    }
}
