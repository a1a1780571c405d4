//! Spot prices derived from pool reserves.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// Exchange rate between the two sides of a pool as a dimensionless ratio.
///
/// Wraps an `f64` that must be finite and non-negative.  Prices are a
/// read-only view for quoting and display; no reserve accounting is ever
/// done in floating point.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::{Amount, Price};
///
/// let p = Price::from_amounts(Amount::new(100), Amount::new(10)).expect("non-zero");
/// assert!((p.get() - 10.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    /// Price ratio of 1:1.
    pub const ONE: Self = Self(1.0);

    /// Creates a new `Price`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrice`] if the value is negative, NaN,
    /// or infinite.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(AmmError::InvalidPrice(
                "price must be finite and non-negative",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Computes `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::InvalidPrice`] if the ratio is not finite.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_amounts(numerator: Amount, denominator: Amount) -> crate::error::Result<Self> {
        if denominator.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        Self::new(numerator.get() as f64 / denominator.get() as f64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pair of spot prices a pool quotes from its current reserves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotPrices {
    /// Native units per unit of asset: `reserve_native / reserve_asset`.
    pub asset_in_native: Price,
    /// Asset units per native unit: `reserve_asset / reserve_native`.
    pub native_in_asset: Price,
}

impl fmt::Display for SpotPrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1 asset = {} native, 1 native = {} asset",
            self.asset_in_native, self.native_in_asset
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_and_negative() {
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
        assert!(Price::new(-0.5).is_err());
        assert!(Price::new(0.0).is_ok());
    }

    #[test]
    fn from_amounts_divides() {
        let Ok(p) = Price::from_amounts(Amount::new(1), Amount::new(4)) else {
            panic!("expected Ok");
        };
        assert!((p.get() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn from_amounts_zero_denominator() {
        assert_eq!(
            Price::from_amounts(Amount::new(1), Amount::ZERO),
            Err(AmmError::DivisionByZero)
        );
    }
}
