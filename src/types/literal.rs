use std::{fmt, num::NonZeroI32, ops::Not};

/// 1-based variable index.
pub type VarId = usize;

/// Literal encoded as a non-zero `i32`:
///
/// - the magnitude is the 1-based variable identifier, and
/// - the sign is the polarity; negative means negated.
///
/// Zero is unrepresentable, so the invalid literal cannot be built.
/// Negation is arithmetic and never allocates.
///
/// # Examples
///
/// ```
/// use bitblast::types::Literal;
/// let l = Literal::try_from(2).unwrap();
/// assert_eq!(i32::from(!l), -2);
/// assert_eq!((!l).var_id(), 2);
/// assert!(l.is_positive());
/// assert!(Literal::try_from(0).is_err());
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Literal {
    ordinal: NonZeroI32,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", self.ordinal)
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", self.ordinal)
    }
}

/// convert literals to `[i32]` (for debug).
pub fn i32s(v: &[Literal]) -> Vec<i32> {
    v.iter().map(|l| i32::from(*l)).collect::<Vec<_>>()
}

impl TryFrom<i32> for Literal {
    type Error = crate::types::ModelError;
    #[inline]
    fn try_from(x: i32) -> Result<Self, Self::Error> {
        NonZeroI32::new(x)
            .map(|ordinal| Literal { ordinal })
            .ok_or(crate::types::ModelError::UnknownIdentifier(0))
    }
}

impl From<Literal> for i32 {
    #[inline]
    fn from(l: Literal) -> i32 {
        l.ordinal.get()
    }
}

impl From<&Literal> for i32 {
    #[inline]
    fn from(l: &Literal) -> i32 {
        l.ordinal.get()
    }
}

impl Not for Literal {
    type Output = Literal;
    #[inline]
    fn not(self) -> Self {
        Literal {
            // negating a non-zero i32 cannot produce zero
            ordinal: unsafe { NonZeroI32::new_unchecked(-self.ordinal.get()) },
        }
    }
}

impl Literal {
    /// make the positive literal of variable `vi`.
    ///
    /// # Safety contract
    /// `vi` must be a real variable index (non-zero); the store is the
    /// only caller and allocates indices starting at 1.
    #[inline]
    pub(crate) fn positive(vi: VarId) -> Self {
        debug_assert!(0 < vi);
        Literal {
            ordinal: unsafe { NonZeroI32::new_unchecked(vi as i32) },
        }
    }
    /// the variable this literal constrains.
    #[inline]
    pub fn var_id(self) -> VarId {
        self.ordinal.get().unsigned_abs() as VarId
    }
    #[inline]
    pub fn is_positive(self) -> bool {
        0 < self.ordinal.get()
    }
}
