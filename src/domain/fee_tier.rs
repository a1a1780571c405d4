//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The swap fee charged by a pool, wrapping [`BasisPoints`].
///
/// The fee is taken from the swap input and stays in the pool, so it
/// accrues to share holders through the reserves.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// let (net, fee) = tier.split_input(Amount::new(1_000)).expect("fits");
/// assert_eq!(fee, Amount::new(3));
/// assert_eq!(net, Amount::new(997));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const FREE: Self = Self(BasisPoints::ZERO);

    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp), the registry default.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Splits a swap input into `(amount_in_effective, fee)`.
    ///
    /// The fee is rounded up so the pool never undercharges, which makes
    /// `amount_in_effective == floor(amount_in × (10_000 − bps) / 10_000)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if `amount_in × bps` overflows.
    /// - [`AmmError::InvalidFee`] if the fee exceeds the input.
    pub fn split_input(&self, amount_in: Amount) -> Result<(Amount, Amount), AmmError> {
        let fee = self.0.apply(amount_in, Rounding::Up)?;
        let net = amount_in
            .checked_sub(&fee)
            .ok_or(AmmError::InvalidFee("fee exceeds swap input"))?;
        Ok((net, fee))
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_bp() {
        assert_eq!(FeeTier::default().basis_points().get(), 30);
    }

    #[test]
    fn split_matches_floor_of_complement() {
        // floor(12_345 × 9_970 / 10_000) = 12_307
        let Ok((net, fee)) = FeeTier::TIER_0_30_PERCENT.split_input(Amount::new(12_345)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::new(12_307));
        assert_eq!(fee, Amount::new(38));
    }

    #[test]
    fn split_tiny_input_consumes_everything() {
        let Ok((net, fee)) = FeeTier::TIER_0_30_PERCENT.split_input(Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::ZERO);
        assert_eq!(fee, Amount::new(1));
    }

    #[test]
    fn free_tier_keeps_full_input() {
        let Ok((net, fee)) = FeeTier::FREE.split_input(Amount::new(500)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::new(500));
        assert_eq!(fee, Amount::ZERO);
    }

    #[test]
    fn fee_above_hundred_percent_rejected() {
        let tier = FeeTier::new(BasisPoints::new(20_000));
        assert!(matches!(
            tier.split_input(Amount::new(100)),
            Err(AmmError::InvalidFee(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(FeeTier::TIER_1_00_PERCENT.to_string(), "FeeTier(100bp)");
    }
}
