//! Canonical Tseitin encodings for the five binary gates.
//!
//! Each gate introduces one fresh output variable `y` and the clause
//! set equivalent to that gate's truth table. A cache hit skips all of
//! it, so calling [`Model::gate`] twice with the same operands (in
//! either order) is one gate's worth of clauses, total.
use {
    super::{cache::GateKey, Model},
    crate::{
        engine::SatEngineIF,
        types::{GateOp, Literal},
    },
};

impl<E: SatEngineIF> Model<E> {
    /// encode `op(a, b)` and return its output literal, reusing the
    /// cached output when this exact gate has been encoded before.
    pub fn gate(&mut self, op: GateOp, a: Literal, b: Literal) -> Literal {
        let key = GateKey::new(op, a, b);
        if let Some(out) = self.cache.get_gate(&key) {
            return out;
        }
        let y = self.new_variable();
        match op {
            GateOp::And => self.push_clauses(&[vec![!a, !b, y], vec![a, !y], vec![b, !y]]),
            GateOp::Nand => self.push_clauses(&[vec![!a, !b, !y], vec![a, y], vec![b, y]]),
            GateOp::Or => self.push_clauses(&[vec![a, b, !y], vec![!a, y], vec![!b, y]]),
            GateOp::Nor => self.push_clauses(&[vec![a, b, y], vec![!a, !y], vec![!b, !y]]),
            GateOp::Xor => self.push_clauses(&[
                vec![!a, !b, !y],
                vec![a, b, !y],
                vec![a, !b, y],
                vec![!a, b, y],
            ]),
        }
        self.cache.put_gate(key, y);
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimpleEngine;

    #[test]
    fn gate_allocates_once_per_key() {
        let mut m = Model::<SimpleEngine>::default();
        let a = m.new_variable();
        let b = m.new_variable();
        let before = m.num_clauses();
        let y1 = m.gate(GateOp::And, a, b);
        let grown = m.num_clauses() - before;
        assert_eq!(grown, 3);
        let y2 = m.gate(GateOp::And, b, a);
        assert_eq!(y1, y2);
        assert_eq!(m.num_clauses() - before, 3);
    }

    #[test]
    fn negated_operand_is_a_new_gate() {
        let mut m = Model::<SimpleEngine>::default();
        let a = m.new_variable();
        let b = m.new_variable();
        let y1 = m.gate(GateOp::Or, a, b);
        let y2 = m.gate(GateOp::Or, !a, b);
        assert_ne!(y1, y2);
    }

    #[test]
    fn xor_emits_four_clauses() {
        let mut m = Model::<SimpleEngine>::default();
        let a = m.new_variable();
        let b = m.new_variable();
        let before = m.num_clauses();
        m.gate(GateOp::Xor, a, b);
        assert_eq!(m.num_clauses() - before, 4);
    }
}
