//! Module `types` provides the building blocks shared by the encoder:
//! literals, the concrete-or-symbolic `Bit` sum, gate operators and
//! error values.

/// methods on literals
pub mod literal;

pub use self::literal::{i32s, Literal, VarId};

use std::fmt;

/// A bit that is either a concrete boolean or a symbolic literal.
///
/// This is the closed sum replacing ad-hoc "bool or variable" dispatch:
/// every scalar operand of the algebra layer is a `Bit`, and only the
/// `Lit` arm ever reaches the Tseitin encoder.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Bit {
    Bool(bool),
    Lit(Literal),
}

impl From<bool> for Bit {
    #[inline]
    fn from(b: bool) -> Self {
        Bit::Bool(b)
    }
}

impl From<Literal> for Bit {
    #[inline]
    fn from(l: Literal) -> Self {
        Bit::Lit(l)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Bit::Bool(b) => write!(f, "{b}"),
            Bit::Lit(l) => write!(f, "{l}"),
        }
    }
}

impl Bit {
    /// return the concrete value if this bit is not symbolic.
    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Bit::Bool(b) => Some(b),
            Bit::Lit(_) => None,
        }
    }
    /// return the literal if this bit is symbolic.
    #[inline]
    pub fn as_lit(self) -> Option<Literal> {
        match self {
            Bit::Bool(_) => None,
            Bit::Lit(l) => Some(l),
        }
    }
    #[inline]
    pub fn is_concrete(self) -> bool {
        matches!(self, Bit::Bool(_))
    }
    /// negation; pure, allocates nothing.
    #[inline]
    pub fn negate(self) -> Bit {
        match self {
            Bit::Bool(b) => Bit::Bool(!b),
            Bit::Lit(l) => Bit::Lit(!l),
        }
    }
}

/// The five cached binary gate kinds. NOT is never a gate; negating a
/// literal is a sign flip and emits no clauses.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum GateOp {
    And,
    Nand,
    Or,
    Nor,
    Xor,
}

/// Contract violations raised by the encoder.
/// All of these surface synchronously at the offending call; a failing
/// call commits no clause, variable, or cache entry.
#[derive(Debug, Eq, PartialEq)]
pub enum ModelError {
    /// a concrete boolean where a literal is required (assert/assume).
    InvalidArgument,
    /// two fixed-width operands of different widths.
    SizeMismatch(usize, usize),
    /// a fixed-width operand too narrow for a required value.
    WidthExceeded(usize, usize),
    /// a raw identifier that no declared variable matches ('0' included).
    UnknownIdentifier(i32),
    /// truth-value readback before a successful solve.
    UnsolvedAccess,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::SizeMismatch(l, r) => write!(f, "mismatched widths: {l} vs {r}"),
            ModelError::WidthExceeded(need, have) => {
                write!(f, "value needs {need} bits but width is {have}")
            }
            ModelError::UnknownIdentifier(raw) => write!(f, "unknown identifier {raw}"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl std::error::Error for ModelError {}
