//! Gate cache: one output literal per distinct (operator, operand pair).
//!
//! The cache is what keeps repeated sub-expressions from re-encoding:
//! a hit returns the stored output with no new variable and no new
//! clauses, so clause growth is bounded by the number of *distinct*
//! gates in the formula.
use {
    crate::types::{GateOp, Literal},
    ahash::AHashMap,
};

/// Canonical cache key for a commutative binary gate.
///
/// Operands are ordered by (magnitude, polarity) so that
/// `key(op, a, b) == key(op, b, a)`. Polarity is preserved: `AND(x, y)`
/// and `AND(-x, y)` are different gates and get different keys.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GateKey {
    op: GateOp,
    lo: Literal,
    hi: Literal,
}

impl GateKey {
    pub fn new(op: GateOp, a: Literal, b: Literal) -> Self {
        let a_rank = (a.var_id(), a.is_positive());
        let b_rank = (b.var_id(), b.is_positive());
        if a_rank <= b_rank {
            GateKey { op, lo: a, hi: b }
        } else {
            GateKey { op, lo: b, hi: a }
        }
    }
}

#[derive(Debug, Default)]
pub struct GateCache {
    gates: AHashMap<GateKey, Literal>,
}

impl GateCache {
    pub fn get_gate(&self, key: &GateKey) -> Option<Literal> {
        self.gates.get(key).copied()
    }
    pub fn put_gate(&mut self, key: GateKey, out: Literal) {
        debug_assert!(!self.gates.contains_key(&key));
        self.gates.insert(key, out);
    }
    pub fn len(&self) -> usize {
        self.gates.len()
    }
}
