//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of `Option`, so pool code can propagate with `?` and callers can tell
//! overflow from underflow.
//!
//! # Examples
//!
//! ```
//! use qite_dex::domain::Amount;
//! use qite_dex::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! assert!(a.safe_add(&Amount::new(200)).is_ok());
//! assert!(a.safe_sub(&Amount::new(200)).is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn amount_add_ok() {
        let Ok(r) = Amount::new(100).safe_add(&Amount::new(200)) else {
            panic!("expected Ok");
        };
        assert_eq!(r, Amount::new(300));
    }

    #[test]
    fn amount_add_overflow() {
        let Err(AmmError::Overflow(_)) = Amount::MAX.safe_add(&Amount::new(1)) else {
            panic!("expected Overflow");
        };
    }

    #[test]
    fn amount_sub_underflow() {
        let Err(AmmError::Underflow(_)) = Amount::new(1).safe_sub(&Amount::new(2)) else {
            panic!("expected Underflow");
        };
    }

    #[test]
    fn shares_roundtrip() {
        let Ok(sum) = Shares::new(7).safe_add(&Shares::new(3)) else {
            panic!("expected Ok");
        };
        let Ok(back) = sum.safe_sub(&Shares::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(back, Shares::new(7));
    }

    #[test]
    fn shares_sub_underflow() {
        let Err(AmmError::Underflow(_)) = Shares::ZERO.safe_sub(&Shares::new(1)) else {
            panic!("expected Underflow");
        };
    }
}
