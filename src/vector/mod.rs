//! Module `vector` provides fixed-width bit-vectors over concrete and
//! symbolic bits, most-significant bit first.
/// adder, subtractor, multiplier, divider, population count
mod arith;
/// operand width reconciliation
mod reconcile;

pub use self::{
    arith::full_adder,
    reconcile::{int_bits, reconcile, Operand},
};

use {
    crate::{
        engine::SatEngineIF,
        model::Model,
        types::{Bit, ModelError},
    },
    std::{
        fmt,
        ops::{Index, Range},
    },
};

/// An immutable, fixed-width sequence of bits; element 0 is the
/// most-significant bit. Operations build new vectors; none mutates.
///
/// `==` on vectors is *structural* (same bit sequence). The
/// clause-producing comparisons are the named methods taking the model:
/// [`eq`](`Vector::eq`), [`lt`](`Vector::lt`) and friends.
///
/// # Examples
///
/// ```
/// use bitblast::*;
/// let mut m = Model::<SimpleEngine>::default();
/// let a = m.vector(4);
/// let is_five = a.eq(&mut m, 5).unwrap();
/// m.assert_unit(is_five).unwrap();
/// assert_eq!(m.solve(), Satisfiability::Sat);
/// assert_eq!(a.value_of(&m), Ok(5));
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Vector {
    bits: Vec<Bit>,
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<")?;
        for (i, b) in self.bits.iter().enumerate() {
            if 0 < i {
                write!(f, ", ")?;
            }
            write!(f, "{b}")?;
        }
        write!(f, ">")
    }
}

impl Index<usize> for Vector {
    type Output = Bit;
    fn index(&self, i: usize) -> &Bit {
        &self.bits[i]
    }
}

impl From<Vec<Bit>> for Vector {
    fn from(bits: Vec<Bit>) -> Self {
        Vector { bits }
    }
}

impl<E: SatEngineIF> Model<E> {
    /// a new vector of `width` freshly allocated variables.
    pub fn vector(&mut self, width: usize) -> Vector {
        Vector {
            bits: (0..width).map(|_| Bit::Lit(self.new_variable())).collect(),
        }
    }
}

impl Vector {
    /// wrap an existing bit sequence. Raw identifiers should go through
    /// [`Model::lit`](`crate::model::Model::lit`) first; wrapping does
    /// not validate.
    pub fn from_bits(bits: Vec<Bit>) -> Self {
        Vector { bits }
    }
    /// the minimal-width (elastic) encoding of an integer constant.
    pub fn from_int(value: u64) -> Self {
        Vector {
            bits: int_bits(value),
        }
    }
    /// an integer constant at a committed width.
    ///
    /// # Errors
    ///
    /// `ModelError::WidthExceeded` when `value` does not fit.
    pub fn from_int_width(value: u64, width: usize) -> Result<Self, ModelError> {
        let bits = int_bits(value);
        if width < bits.len() {
            return Err(ModelError::WidthExceeded(bits.len(), width));
        }
        let mut padded = vec![Bit::Bool(false); width - bits.len()];
        padded.extend(bits);
        Ok(Vector { bits: padded })
    }
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }
    pub fn len(&self) -> usize {
        self.bits.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
    pub fn get(&self, i: usize) -> Option<Bit> {
        self.bits.get(i).copied()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Bit> {
        self.bits.iter()
    }
    /// the sub-vector at `range`.
    pub fn slice(&self, range: Range<usize>) -> Vector {
        Vector {
            bits: self.bits[range].to_vec(),
        }
    }
    /// this vector followed by `other`.
    pub fn concat(&self, other: &Vector) -> Vector {
        let mut bits = self.bits.clone();
        bits.extend(other.bits.iter().copied());
        Vector { bits }
    }
    /// chop into consecutive vectors of `width`.
    ///
    /// # Errors
    ///
    /// `ModelError::SizeMismatch` unless `width` divides the length.
    pub fn split(&self, width: usize) -> Result<Vec<Vector>, ModelError> {
        if width == 0 || self.bits.len() % width != 0 {
            return Err(ModelError::SizeMismatch(self.bits.len(), width));
        }
        Ok(self
            .bits
            .chunks(width)
            .map(|c| Vector { bits: c.to_vec() })
            .collect())
    }

    /// bitwise negation; pure, emits nothing.
    pub fn not(&self) -> Vector {
        Vector {
            bits: self.bits.iter().map(|b| b.negate()).collect(),
        }
    }

    fn zip_gate<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
        gate: fn(&mut Model<E>, Bit, Bit) -> Bit,
    ) -> Result<Vector, ModelError> {
        let (l, r) = reconcile(Operand::Fixed(&self.bits), rhs.into())?;
        Ok(Vector {
            bits: l
                .into_iter()
                .zip(r.into_iter())
                .map(|(a, b)| gate(m, a, b))
                .collect(),
        })
    }
    pub fn and<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.zip_gate(m, rhs, Model::and)
    }
    pub fn or<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.zip_gate(m, rhs, Model::or)
    }
    pub fn xor<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.zip_gate(m, rhs, Model::xor)
    }
    pub fn nand<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.zip_gate(m, rhs, Model::nand)
    }
    pub fn nor<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.zip_gate(m, rhs, Model::nor)
    }

    /// `self == rhs` as a bit: the AND of element-wise equality,
    /// most-significant first.
    pub fn eq<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Bit, ModelError> {
        let (l, r) = reconcile(Operand::Fixed(&self.bits), rhs.into())?;
        let mut acc = Bit::Bool(true);
        for (a, b) in l.into_iter().zip(r.into_iter()) {
            let e = m.eq(a, b);
            acc = m.and(acc, e);
        }
        Ok(acc)
    }
    pub fn ne<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Bit, ModelError> {
        self.eq(m, rhs).map(|b| b.negate())
    }
    /// unsigned `self < rhs`: first-difference comparison with a
    /// running all-prior-equal accumulator.
    pub fn lt<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Bit, ModelError> {
        let (l, r) = reconcile(Operand::Fixed(&self.bits), rhs.into())?;
        if l.is_empty() {
            return Ok(Bit::Bool(false));
        }
        let mut result = m.lt(l[0], r[0]);
        let mut prior_eq = Bit::Bool(true);
        for i in 1..l.len() {
            let e = m.eq(l[i - 1], r[i - 1]);
            prior_eq = m.and(prior_eq, e);
            let here = m.lt(l[i], r[i]);
            let masked = m.and(prior_eq, here);
            result = m.or(result, masked);
        }
        Ok(result)
    }
    pub fn le<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Bit, ModelError> {
        let rhs = rhs.into();
        let lt = self.lt(m, rhs)?;
        let eq = self.eq(m, rhs)?;
        Ok(m.or(lt, eq))
    }
    pub fn gt<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Bit, ModelError> {
        self.le(m, rhs).map(|b| b.negate())
    }
    pub fn ge<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Bit, ModelError> {
        self.lt(m, rhs).map(|b| b.negate())
    }

    /// rotate left by `amount mod width`; a rotation by the full width
    /// is the identity.
    pub fn rotl(&self, amount: usize) -> Vector {
        if self.bits.is_empty() {
            return self.clone();
        }
        let amount = amount % self.bits.len();
        let mut bits = self.bits[amount..].to_vec();
        bits.extend_from_slice(&self.bits[..amount]);
        Vector { bits }
    }
    /// rotate right by `amount mod width`.
    pub fn rotr(&self, amount: usize) -> Vector {
        if self.bits.is_empty() {
            return self.clone();
        }
        let amount = amount % self.bits.len();
        self.rotl(self.bits.len() - amount)
    }
    /// shift left, dropping `amount` most-significant bits and
    /// appending `amount` fillers; the width is preserved. Shifting by
    /// the width or more yields all fillers.
    pub fn shiftl(&self, amount: usize, filler: impl Into<Bit>) -> Vector {
        let amount = amount.min(self.bits.len());
        let mut bits = self.bits[amount..].to_vec();
        bits.extend(std::iter::repeat(filler.into()).take(amount));
        Vector { bits }
    }
    /// shift right. With a filler the width is preserved; with `None`
    /// the vector narrows by `amount`.
    pub fn shiftr(&self, amount: usize, filler: Option<Bit>) -> Vector {
        let amount = amount.min(self.bits.len());
        let kept = &self.bits[..self.bits.len() - amount];
        let mut bits = match filler {
            Some(f) => vec![f; amount],
            None => Vec::new(),
        };
        bits.extend_from_slice(kept);
        Vector { bits }
    }
    /// keep the `width` least-significant bits.
    pub fn truncate(&self, width: usize) -> Vector {
        let start = self.bits.len().saturating_sub(width);
        Vector {
            bits: self.bits[start..].to_vec(),
        }
    }

    fn fold<E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        empty: bool,
        gate: fn(&mut Model<E>, Bit, Bit) -> Bit,
    ) -> Bit {
        let mut iter = self.bits.iter();
        let Some(first) = iter.next() else {
            return Bit::Bool(empty);
        };
        iter.fold(*first, |acc, b| gate(m, acc, *b))
    }
    /// AND across all elements.
    pub fn bit_and<E: SatEngineIF>(&self, m: &mut Model<E>) -> Bit {
        self.fold(m, true, Model::and)
    }
    /// left-nested NAND across all elements.
    pub fn bit_nand<E: SatEngineIF>(&self, m: &mut Model<E>) -> Bit {
        self.fold(m, false, Model::nand)
    }
    /// OR across all elements.
    pub fn bit_or<E: SatEngineIF>(&self, m: &mut Model<E>) -> Bit {
        self.fold(m, false, Model::or)
    }
    /// left-nested NOR across all elements.
    pub fn bit_nor<E: SatEngineIF>(&self, m: &mut Model<E>) -> Bit {
        self.fold(m, true, Model::nor)
    }
    /// XOR across all elements (parity of the set bits).
    pub fn bit_xor<E: SatEngineIF>(&self, m: &mut Model<E>) -> Bit {
        self.fold(m, false, Model::xor)
    }

    fn splat<E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        v: Bit,
        gate: fn(&mut Model<E>, Bit, Bit) -> Bit,
    ) -> Vector {
        Vector {
            bits: self.bits.iter().map(|b| gate(m, v, *b)).collect(),
        }
    }
    /// AND a single bit against every element.
    pub fn splat_and<E: SatEngineIF>(&self, m: &mut Model<E>, v: impl Into<Bit>) -> Vector {
        self.splat(m, v.into(), Model::and)
    }
    pub fn splat_nand<E: SatEngineIF>(&self, m: &mut Model<E>, v: impl Into<Bit>) -> Vector {
        self.splat(m, v.into(), Model::nand)
    }
    pub fn splat_or<E: SatEngineIF>(&self, m: &mut Model<E>, v: impl Into<Bit>) -> Vector {
        self.splat(m, v.into(), Model::or)
    }
    pub fn splat_nor<E: SatEngineIF>(&self, m: &mut Model<E>, v: impl Into<Bit>) -> Vector {
        self.splat(m, v.into(), Model::nor)
    }
    pub fn splat_xor<E: SatEngineIF>(&self, m: &mut Model<E>, v: impl Into<Bit>) -> Vector {
        self.splat(m, v.into(), Model::xor)
    }

    /// whether the vector's numeric value is odd: its lowest bit.
    pub fn odd(&self) -> Bit {
        self.bits.last().copied().unwrap_or(Bit::Bool(false))
    }
    /// whether the vector's numeric value is even.
    pub fn even(&self) -> Bit {
        self.odd().negate()
    }

    /// the integer value under the model's latest assignment,
    /// most-significant bit first.
    ///
    /// # Errors
    ///
    /// * `ModelError::UnsolvedAccess` while unsolved, after UNSAT, or
    ///   when any symbolic bit is unassigned.
    /// * `ModelError::WidthExceeded` for vectors wider than 64 bits.
    pub fn value_of<E: SatEngineIF>(&self, m: &Model<E>) -> Result<u64, ModelError> {
        if 64 < self.bits.len() {
            return Err(ModelError::WidthExceeded(self.bits.len(), 64));
        }
        let mut value = 0u64;
        for b in self.bits.iter() {
            let v = m.value(*b).ok_or(ModelError::UnsolvedAccess)?;
            value = value << 1 | u64::from(v);
        }
        Ok(value)
    }
    /// the literals of the symbolic bits, for
    /// [`negate_solution`](`crate::model::Model::negate_solution`).
    pub fn literals(&self) -> Vec<crate::types::Literal> {
        self.bits.iter().filter_map(|b| b.as_lit()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::SimpleEngine, model::Satisfiability};

    #[test]
    fn construction_and_width() {
        let mut m = Model::<SimpleEngine>::default();
        let v = m.vector(5);
        assert_eq!(v.len(), 5);
        assert!(v.iter().all(|b| !b.is_concrete()));
        assert_eq!(Vector::from_int(6).len(), 3);
        let w = Vector::from_int_width(6, 5).unwrap();
        assert_eq!(w.len(), 5);
        assert_eq!(
            Vector::from_int_width(32, 5),
            Err(ModelError::WidthExceeded(6, 5))
        );
    }

    #[test]
    fn structural_equality_is_not_clause_producing() {
        let mut m = Model::<SimpleEngine>::default();
        let a = m.vector(3);
        let b = a.clone();
        let clauses = m.num_clauses();
        assert_eq!(a, b);
        assert_ne!(a, a.not());
        assert_eq!(m.num_clauses(), clauses);
    }

    #[test]
    fn rotation_modulus_is_the_width() {
        let v = Vector::from_int_width(0b0011, 4).unwrap();
        assert_eq!(v.rotl(4), v);
        assert_eq!(v.rotr(4), v);
        assert_eq!(v.rotl(1), Vector::from_int_width(0b0110, 4).unwrap());
        assert_eq!(v.rotr(1), Vector::from_int_width(0b1001, 4).unwrap());
        assert_eq!(v.rotl(5), v.rotl(1));
    }

    #[test]
    fn shifts_and_truncation() {
        let v = Vector::from_int_width(0b0110, 4).unwrap();
        assert_eq!(
            v.shiftl(1, false),
            Vector::from_int_width(0b1100, 4).unwrap()
        );
        assert_eq!(
            v.shiftr(1, Some(Bit::Bool(false))),
            Vector::from_int_width(0b0011, 4).unwrap()
        );
        let narrowed = v.shiftr(1, None);
        assert_eq!(narrowed.len(), 3);
        assert_eq!(narrowed, Vector::from_int_width(0b011, 3).unwrap());
        assert_eq!(v.truncate(2), Vector::from_int_width(0b10, 2).unwrap());
        assert_eq!(v.shiftl(9, true), Vector::from_int_width(0b1111, 4).unwrap());
    }

    #[test]
    fn concat_split_slice() {
        let a = Vector::from_int_width(0b10, 2).unwrap();
        let b = Vector::from_int_width(0b01, 2).unwrap();
        let joined = a.concat(&b);
        assert_eq!(joined.len(), 4);
        assert_eq!(joined.split(2).unwrap(), vec![a, b]);
        assert_eq!(joined.split(3), Err(ModelError::SizeMismatch(4, 3)));
        assert_eq!(joined.slice(1..3).len(), 2);
    }

    #[test]
    fn bitwise_ops_against_constants() {
        let mut m = Model::<SimpleEngine>::default();
        let a = m.vector(4);
        let anded = a.and(&mut m, 0).unwrap();
        assert_eq!(anded, Vector::from_int_width(0, 4).unwrap());
        let ored = a.or(&mut m, 15).unwrap();
        assert_eq!(ored, Vector::from_int_width(15, 4).unwrap());
        // identity masks collapse without gates
        assert_eq!(a.and(&mut m, 15).unwrap(), a);
        assert_eq!(m.num_gates(), 0);
    }

    #[test]
    fn mixed_width_rules() {
        let mut m = Model::<SimpleEngine>::default();
        let a = m.vector(4);
        let b = m.vector(7);
        assert_eq!(
            a.xor(&mut m, &b).unwrap_err(),
            ModelError::SizeMismatch(4, 7)
        );
        assert_eq!(
            a.xor(&mut m, 16).unwrap_err(),
            ModelError::WidthExceeded(5, 4)
        );
        assert!(a.xor(&mut m, 3).is_ok());
    }

    #[test]
    fn relational_readback() {
        let mut m = Model::<SimpleEngine>::default();
        let a = m.vector(4);
        let under = a.lt(&mut m, 5).unwrap();
        let exact = a.eq(&mut m, 3).unwrap();
        m.assert_unit(under).unwrap();
        m.assert_unit(exact).unwrap();
        assert_eq!(m.solve(), Satisfiability::Sat);
        assert_eq!(a.value_of(&m), Ok(3));
    }

    #[test]
    fn comparison_of_constants_folds() {
        let mut m = Model::<SimpleEngine>::default();
        let three = Vector::from_int_width(3, 4).unwrap();
        assert_eq!(three.lt(&mut m, 5).unwrap(), Bit::Bool(true));
        assert_eq!(three.ge(&mut m, 5).unwrap(), Bit::Bool(false));
        assert_eq!(three.eq(&mut m, 3).unwrap(), Bit::Bool(true));
        assert_eq!(three.le(&mut m, 3).unwrap(), Bit::Bool(true));
        assert_eq!(three.gt(&mut m, 2).unwrap(), Bit::Bool(true));
        assert_eq!(three.ne(&mut m, 3).unwrap(), Bit::Bool(false));
        assert_eq!(m.num_gates(), 0);
    }

    #[test]
    fn parity_helpers() {
        let v = Vector::from_int_width(6, 4).unwrap();
        assert_eq!(v.odd(), Bit::Bool(false));
        assert_eq!(v.even(), Bit::Bool(true));
    }

    #[test]
    fn folds_and_splats_on_constants() {
        let mut m = Model::<SimpleEngine>::default();
        let v = Vector::from_int_width(0b1011, 4).unwrap();
        assert_eq!(v.bit_and(&mut m), Bit::Bool(false));
        assert_eq!(v.bit_or(&mut m), Bit::Bool(true));
        assert_eq!(v.bit_xor(&mut m), Bit::Bool(true));
        assert_eq!(
            v.splat_and(&mut m, false),
            Vector::from_int_width(0, 4).unwrap()
        );
        assert_eq!(v.splat_xor(&mut m, true), v.not());
    }

    #[test]
    fn readback_requires_a_solution() {
        let mut m = Model::<SimpleEngine>::default();
        let v = m.vector(3);
        assert_eq!(v.value_of(&m), Err(ModelError::UnsolvedAccess));
    }
}
