//! Scalar boolean algebra over [`Bit`]s.
//!
//! Every operator constant-folds before the Tseitin encoder is
//! consulted: a concrete operand is short-circuited away, so only
//! symbolic-symbolic pairs ever allocate a gate. The comparison
//! operators are derived algebraically from AND/OR/XOR/NOT and add no
//! cache entries of their own.
use crate::{
    engine::SatEngineIF,
    model::Model,
    types::{Bit, GateOp},
};

impl<E: SatEngineIF> Model<E> {
    /// logical negation; pure, never a gate.
    pub fn not(&self, b: impl Into<Bit>) -> Bit {
        b.into().negate()
    }
    pub fn and(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        match (l.into(), r.into()) {
            (Bit::Bool(l), Bit::Bool(r)) => Bit::Bool(l && r),
            (Bit::Bool(false), _) | (_, Bit::Bool(false)) => Bit::Bool(false),
            (Bit::Bool(true), x) | (x, Bit::Bool(true)) => x,
            (Bit::Lit(a), Bit::Lit(b)) => Bit::Lit(self.gate(GateOp::And, a, b)),
        }
    }
    pub fn nand(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        match (l.into(), r.into()) {
            (Bit::Bool(l), Bit::Bool(r)) => Bit::Bool(!(l && r)),
            (Bit::Bool(false), _) | (_, Bit::Bool(false)) => Bit::Bool(true),
            (Bit::Bool(true), x) | (x, Bit::Bool(true)) => x.negate(),
            (Bit::Lit(a), Bit::Lit(b)) => Bit::Lit(self.gate(GateOp::Nand, a, b)),
        }
    }
    pub fn or(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        match (l.into(), r.into()) {
            (Bit::Bool(l), Bit::Bool(r)) => Bit::Bool(l || r),
            (Bit::Bool(true), _) | (_, Bit::Bool(true)) => Bit::Bool(true),
            (Bit::Bool(false), x) | (x, Bit::Bool(false)) => x,
            (Bit::Lit(a), Bit::Lit(b)) => Bit::Lit(self.gate(GateOp::Or, a, b)),
        }
    }
    pub fn nor(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        match (l.into(), r.into()) {
            (Bit::Bool(l), Bit::Bool(r)) => Bit::Bool(!(l || r)),
            (Bit::Bool(true), _) | (_, Bit::Bool(true)) => Bit::Bool(false),
            (Bit::Bool(false), x) | (x, Bit::Bool(false)) => x.negate(),
            (Bit::Lit(a), Bit::Lit(b)) => Bit::Lit(self.gate(GateOp::Nor, a, b)),
        }
    }
    pub fn xor(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        match (l.into(), r.into()) {
            (Bit::Bool(l), Bit::Bool(r)) => Bit::Bool(l ^ r),
            (Bit::Bool(true), x) | (x, Bit::Bool(true)) => x.negate(),
            (Bit::Bool(false), x) | (x, Bit::Bool(false)) => x,
            (Bit::Lit(a), Bit::Lit(b)) => Bit::Lit(self.gate(GateOp::Xor, a, b)),
        }
    }
    /// `l < r`, i.e. `l` is false and `r` is true.
    pub fn lt(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        let (l, r) = (l.into(), r.into());
        let x = self.xor(l, r);
        self.and(x, r)
    }
    /// `l <= r`.
    pub fn le(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        let (l, r) = (l.into(), r.into());
        let e = self.eq(l, r);
        self.or(e, r)
    }
    /// `l == r`.
    pub fn eq(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        let l = l.into().negate();
        self.xor(l, r.into())
    }
    /// `l != r`.
    pub fn ne(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        self.xor(l, r)
    }
    /// `l > r`, i.e. `l` is true and `r` is false.
    pub fn gt(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        let (l, r) = (l.into(), r.into());
        let x = self.xor(l, r);
        self.and(x, l)
    }
    /// `l >= r`.
    pub fn ge(&mut self, l: impl Into<Bit>, r: impl Into<Bit>) -> Bit {
        let (l, r) = (l.into(), r.into());
        let e = self.eq(l, r);
        self.or(e, l)
    }
}
