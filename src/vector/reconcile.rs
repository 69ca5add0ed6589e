//! Operand width reconciliation.
//!
//! Fixed-width operands (vectors, bit slices) never stretch or shrink;
//! elastic operands (plain integers) zero-extend on the
//! most-significant side to meet a wider fixed peer. Every binary
//! vector operation funnels its operands through [`reconcile`] before
//! any gate is built, which is what makes failing calls side-effect
//! free.
use {
    super::Vector,
    crate::types::{Bit, ModelError},
};

/// The right-hand side of a binary vector operation.
///
/// `Fixed` carries a committed width; `Elastic` is a plain integer
/// whose width is whatever the peer needs (but no less than its
/// minimal binary form).
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    Fixed(&'a [Bit]),
    Elastic(u64),
}

impl<'a> From<&'a Vector> for Operand<'a> {
    fn from(v: &'a Vector) -> Self {
        Operand::Fixed(v.bits())
    }
}

impl<'a> From<&'a [Bit]> for Operand<'a> {
    fn from(bits: &'a [Bit]) -> Self {
        Operand::Fixed(bits)
    }
}

impl From<u64> for Operand<'_> {
    fn from(value: u64) -> Self {
        Operand::Elastic(value)
    }
}

/// minimal-width big-endian bits of `value`; zero is one bit wide.
pub fn int_bits(value: u64) -> Vec<Bit> {
    let width = (u64::BITS - value.leading_zeros()).max(1) as usize;
    (0..width)
        .rev()
        .map(|i| Bit::Bool(value >> i & 1 == 1))
        .collect()
}

fn resolve(operand: Operand<'_>) -> (Vec<Bit>, bool) {
    match operand {
        Operand::Fixed(bits) => (bits.to_vec(), true),
        Operand::Elastic(value) => (int_bits(value), false),
    }
}

fn zero_extend(bits: &mut Vec<Bit>, width: usize) {
    while bits.len() < width {
        bits.insert(0, Bit::Bool(false));
    }
}

/// bring two operands to a common width.
///
/// # Errors
///
/// * `ModelError::SizeMismatch` when both are fixed at different widths.
/// * `ModelError::WidthExceeded` when a fixed operand is narrower than
///   its peer; a fixed width is never implicitly truncated.
pub fn reconcile(
    left: Operand<'_>,
    right: Operand<'_>,
) -> Result<(Vec<Bit>, Vec<Bit>), ModelError> {
    let (mut l, l_fixed) = resolve(left);
    let (mut r, r_fixed) = resolve(right);
    if l_fixed && r_fixed && l.len() != r.len() {
        return Err(ModelError::SizeMismatch(l.len(), r.len()));
    }
    if l_fixed && l.len() < r.len() {
        return Err(ModelError::WidthExceeded(r.len(), l.len()));
    }
    if r_fixed && r.len() < l.len() {
        return Err(ModelError::WidthExceeded(l.len(), r.len()));
    }
    let width = l.len().max(r.len());
    zero_extend(&mut l, width);
    zero_extend(&mut r, width);
    Ok((l, r))
}
