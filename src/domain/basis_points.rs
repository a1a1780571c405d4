//! Basis-point representation for fee rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::AmmError;

/// Denominator that represents 100%.
pub(crate) const BPS_DENOMINATOR: u32 = 10_000;

/// A rate expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// All `u32` values can be stored, but only `0..=10_000` is meaningful as
/// a percentage.  Use [`is_valid_percent`](Self::is_valid_percent) to
/// check; pool configuration rejects anything outside that range.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.complement(), Some(BasisPoints::new(9_970)));
/// assert_eq!(bp.apply(Amount::new(1_000_000), Rounding::Down), Ok(Amount::new(3_000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// Returns `10_000 - self`, or `None` if `self` exceeds 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match BPS_DENOMINATOR.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Converts to a floating-point percentage, e.g. 30 bp → `0.30`.
    #[must_use]
    pub fn as_percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Computes `amount × self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the intermediate multiplication overflows.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let product = match amount.get().checked_mul(self.0 as u128) {
            Some(v) => v,
            None => return Err(AmmError::Overflow("basis points apply overflow")),
        };
        match crate::math::div_round(product, BPS_DENOMINATOR as u128, rounding) {
            Some(v) => Ok(Amount::new(v)),
            None => Err(AmmError::DivisionByZero),
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_percent_range() {
        assert!(BasisPoints::ZERO.is_valid_percent());
        assert!(BasisPoints::MAX_PERCENT.is_valid_percent());
        assert!(!BasisPoints::new(10_001).is_valid_percent());
    }

    #[test]
    fn complement_of_standard_fee() {
        assert_eq!(BasisPoints::new(30).complement(), Some(BasisPoints::new(9_970)));
        assert_eq!(BasisPoints::MAX_PERCENT.complement(), Some(BasisPoints::ZERO));
        assert_eq!(BasisPoints::new(10_001).complement(), None);
    }

    #[test]
    fn apply_rounds_as_requested() {
        // 30bp of 1 = 0.003
        let bp = BasisPoints::new(30);
        let Ok(down) = bp.apply(Amount::new(1), Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(up) = bp.apply(Amount::new(1), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(down, Amount::ZERO);
        assert_eq!(up, Amount::new(1));
    }

    #[test]
    fn apply_overflow() {
        let result = BasisPoints::new(u32::MAX).apply(Amount::MAX, Rounding::Down);
        assert!(matches!(result, Err(AmmError::Overflow(_))));
    }

    #[test]
    fn as_percent_and_display() {
        assert!((BasisPoints::new(30).as_percent() - 0.30).abs() < f64::EPSILON);
        assert_eq!(BasisPoints::new(30).to_string(), "30bp");
    }
}
