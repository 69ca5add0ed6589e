//! Arithmetic circuits over [`Vector`]s: ripple-carry addition and
//! subtraction, a grade-school multiplier, a declarative divider and
//! population count. Everything is unsigned; widths follow the
//! reconciliation rules of the bitwise layer.
use {
    super::{reconcile, Operand, Vector},
    crate::{
        engine::SatEngineIF,
        model::Model,
        types::{Bit, ModelError},
    },
};

/// one-bit full adder: `(sum, carry_out)`.
pub fn full_adder<E: SatEngineIF>(m: &mut Model<E>, a: Bit, b: Bit, cin: Bit) -> (Bit, Bit) {
    let half = m.xor(a, b);
    let sum = m.xor(half, cin);
    let generate = m.and(a, b);
    let any = m.or(a, b);
    let propagate = m.and(cin, any);
    let carry = m.or(generate, propagate);
    (sum, carry)
}

/// ripple a carry through two equal-width slices, least-significant
/// bit first.
fn ripple<E: SatEngineIF>(m: &mut Model<E>, l: &[Bit], r: &[Bit], cin: Bit) -> (Vec<Bit>, Bit) {
    debug_assert_eq!(l.len(), r.len());
    let mut carry = cin;
    let mut sums = vec![Bit::Bool(false); l.len()];
    for i in (0..l.len()).rev() {
        let (s, c) = full_adder(m, l[i], r[i], carry);
        sums[i] = s;
        carry = c;
    }
    (sums, carry)
}

fn zext(bits: &[Bit], width: usize) -> Vec<Bit> {
    let mut padded = vec![Bit::Bool(false); width - bits.len()];
    padded.extend_from_slice(bits);
    padded
}

impl Vector {
    /// `self + rhs + cin` at the common width, with the carry out.
    pub fn ripple_add<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
        cin: impl Into<Bit>,
    ) -> Result<(Vector, Bit), ModelError> {
        let (l, r) = reconcile(Operand::Fixed(&self.bits), rhs.into())?;
        let (sum, carry) = ripple(m, &l, &r, cin.into());
        Ok((Vector::from(sum), carry))
    }
    /// modular addition: the carry out is dropped.
    pub fn add<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.ripple_add(m, rhs, false).map(|(v, _)| v)
    }
    /// `self - rhs` by two's complement, with the borrow out. The
    /// borrow is the inverted carry of `self + !rhs + 1`.
    pub fn ripple_sub<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<(Vector, Bit), ModelError> {
        let (l, r) = reconcile(Operand::Fixed(&self.bits), rhs.into())?;
        let negated = r.iter().map(|b| b.negate()).collect::<Vec<_>>();
        let (diff, carry) = ripple(m, &l, &negated, Bit::Bool(true));
        Ok((Vector::from(diff), carry.negate()))
    }
    /// modular subtraction: the borrow out is dropped.
    pub fn sub<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.ripple_sub(m, rhs).map(|(v, _)| v)
    }

    /// the full `2w`-bit product of two `w`-bit operands.
    ///
    /// Grade-school: one splatted partial per multiplier bit, shifted
    /// and accumulated. The running sum is widened one bit per partial
    /// so no carry is ever lost.
    pub fn mul_full<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        let (l, r) = reconcile(Operand::Fixed(&self.bits), rhs.into())?;
        let w = l.len();
        if w == 0 {
            return Ok(Vector::from(Vec::new()));
        }
        let left = Vector::from(l);
        let mut acc = left.splat_and(m, r[w - 1]).bits().to_vec();
        for i in 1..w {
            let mut partial = left.splat_and(m, r[w - 1 - i]).bits().to_vec();
            partial.extend(std::iter::repeat(Bit::Bool(false)).take(i));
            let width = w + i + 1;
            let (sum, _) = ripple(m, &zext(&acc, width), &zext(&partial, width), Bit::Bool(false));
            acc = sum;
        }
        Ok(Vector::from(zext(&acc, 2 * w)))
    }
    /// modular multiplication: the full product truncated to the
    /// common width.
    pub fn mul<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        let product = self.mul_full(m, rhs)?;
        Ok(product.truncate(product.len() / 2))
    }

    /// unsigned `(quotient, remainder)` of `self / rhs`.
    ///
    /// Declarative rather than circuit-based: two fresh vectors are
    /// constrained by `q * d + r == self` at full width and `r < d`.
    /// A zero divisor leaves `r < d` unsatisfiable, so the model as a
    /// whole becomes UNSAT.
    pub fn divmod<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<(Vector, Vector), ModelError> {
        // reconcile up front so a width error commits nothing
        let (l, r) = reconcile(Operand::Fixed(&self.bits), rhs.into())?;
        let w = l.len();
        let dividend = Vector::from(l);
        let divisor = Vector::from(r);
        let quotient = m.vector(w);
        let remainder = m.vector(w);
        let product = quotient.mul_full(m, &divisor)?;
        let (total, _) = product.ripple_add(m, &Vector::from(zext(remainder.bits(), 2 * w)), false)?;
        let exact = total.eq(m, &Vector::from(zext(dividend.bits(), 2 * w)))?;
        m.assert_clause(&[exact]);
        let bounded = remainder.lt(m, &divisor)?;
        m.assert_clause(&[bounded]);
        Ok((quotient, remainder))
    }
    /// the quotient half of [`divmod`](`Vector::divmod`).
    pub fn div<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.divmod(m, rhs).map(|(q, _)| q)
    }
    /// the remainder half of [`divmod`](`Vector::divmod`).
    pub fn rem<'a, E: SatEngineIF>(
        &self,
        m: &mut Model<E>,
        rhs: impl Into<Operand<'a>>,
    ) -> Result<Vector, ModelError> {
        self.divmod(m, rhs).map(|(_, r)| r)
    }

    /// the number of set bits, as a vector of width
    /// `ceil(log2(len + 1))`.
    ///
    /// The accumulator grows by one bit exactly when the running count
    /// reaches a power of two, so intermediate sums never overflow.
    pub fn bit_sum<E: SatEngineIF>(&self, m: &mut Model<E>) -> Vector {
        let Some(first) = self.bits.first() else {
            return Vector::from(vec![Bit::Bool(false)]);
        };
        let mut acc = vec![*first];
        for (index, item) in self.bits[1..].iter().enumerate() {
            if (index + 2).is_power_of_two() {
                acc.insert(0, Bit::Bool(false));
            }
            let mut addend = vec![Bit::Bool(false); acc.len() - 1];
            addend.push(*item);
            let (sum, _) = ripple(m, &acc, &addend, Bit::Bool(false));
            acc = sum;
        }
        Vector::from(acc)
    }
    /// whether an odd number of bits is set: the low bit of the count.
    pub fn bit_odd<E: SatEngineIF>(&self, m: &mut Model<E>) -> Bit {
        self.bit_sum(m).odd()
    }
    /// whether an even number of bits is set.
    pub fn bit_even<E: SatEngineIF>(&self, m: &mut Model<E>) -> Bit {
        self.bit_odd(m).negate()
    }
}
