//! Outcome of a swap.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Price, SwapDirection};
use crate::error::AmmError;

/// The outcome of a swap (or a quote for one).
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee < amount_in`.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::{Amount, SwapDirection, SwapResult};
///
/// let r = SwapResult::new(
///     SwapDirection::NativeToAsset,
///     Amount::new(1_000),
///     Amount::new(9_066),
///     Amount::new(3),
/// );
/// assert!(r.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapResult {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Validation`] if either amount is zero or
    /// `fee >= amount_in`.
    pub const fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::Validation("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::Validation("amount_out must be positive"));
        }
        if fee.get() >= amount_in.get() {
            return Err(AmmError::Validation("fee must be less than amount_in"));
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the full input amount, fee included.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output paid to the trader.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Returns the fee retained by the pool, denominated in the input side.
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Realized price as `amount_out / amount_in`.
    ///
    /// # Errors
    ///
    /// Propagates [`Price::from_amounts`] errors.
    pub fn effective_price(&self) -> crate::error::Result<Price> {
        Price::from_amounts(self.amount_out, self.amount_in)
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}, in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const DIR: SwapDirection = SwapDirection::AssetToNative;

    #[test]
    fn accessors() {
        let Ok(r) = SwapResult::new(DIR, Amount::new(1_000), Amount::new(90), Amount::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(r.direction(), DIR);
        assert_eq!(r.amount_in(), Amount::new(1_000));
        assert_eq!(r.amount_out(), Amount::new(90));
        assert_eq!(r.fee(), Amount::new(3));
    }

    #[test]
    fn zero_amounts_rejected() {
        assert!(SwapResult::new(DIR, Amount::ZERO, Amount::new(1), Amount::ZERO).is_err());
        assert!(SwapResult::new(DIR, Amount::new(1), Amount::ZERO, Amount::ZERO).is_err());
    }

    #[test]
    fn fee_must_be_below_input() {
        assert!(SwapResult::new(DIR, Amount::new(5), Amount::new(1), Amount::new(5)).is_err());
    }

    #[test]
    fn effective_price() {
        let Ok(r) = SwapResult::new(DIR, Amount::new(200), Amount::new(50), Amount::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(p) = r.effective_price() else {
            panic!("expected Ok");
        };
        assert!((p.get() - 0.25).abs() < f64::EPSILON);
    }
}
