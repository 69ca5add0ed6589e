//! Module `engine` defines the boundary to the external SAT engine.
//! The encoder never searches; it hands clauses and assumptions across
//! this trait and reads a `Certificate` back.
/// the bundled reference engine
mod simple;

pub use self::simple::SimpleEngine;

use {crate::types::Literal, std::time::Duration};

/// Outcome of one engine invocation.
///
/// A satisfying assignment is indexed by variable magnitude; slot 0 is
/// unused. `Unknown` is the engine giving up on a budget, which is a
/// result in its own right and never collapsed into `Unsat`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Certificate {
    Sat(Vec<bool>),
    Unsat,
    Unknown,
}

/// Search budgets, passed through to the engine unmodified.
/// `None` means unbounded.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveLimits {
    /// give up after this many conflicts.
    pub conflicts: Option<u64>,
    /// give up after this much wall-clock time.
    pub time: Option<Duration>,
}

/// API an external SAT engine must offer to back a
/// [`Model`](`crate::model::Model`).
///
/// The engine owns no encoder state: the store drives variable creation
/// so the two variable counters never diverge, flushes clauses in
/// batches before each solve, and interprets the returned assignment.
pub trait SatEngineIF {
    /// declare one more variable; returns the new variable count.
    fn add_var(&mut self) -> usize;
    /// accept a clause. Literals are guaranteed non-zero and in range.
    fn add_clause(&mut self, clause: &[Literal]);
    /// accept a batch of clauses.
    fn add_clauses<'a>(&mut self, clauses: impl Iterator<Item = &'a [Literal]>) {
        for c in clauses {
            self.add_clause(c);
        }
    }
    /// run the search under `assumptions` within `limits`.
    fn solve(&mut self, assumptions: &[Literal], limits: &SolveLimits) -> Certificate;
}
