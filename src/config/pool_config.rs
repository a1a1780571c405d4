//! Configuration for constant-product liquidity pools.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{BasisPoints, FeeTier};
use crate::error::AmmError;

/// How a pool treats a deposit whose two amounts do not match the current
/// reserve ratio exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DepositPolicy {
    /// Take one side in full and only the matching (rounded-up) part of
    /// the other; the excess never leaves the provider.
    #[default]
    Trim,
    /// Reject any pair more than one unit of rounding away from the ratio.
    Strict,
}

impl fmt::Display for DepositPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trim => write!(f, "trim"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Immutable parameters of a single native/asset pool.
///
/// # Validation
///
/// - The fee must be a valid percentage (`≤ 10_000` bp).
/// - The fee must be below 100%, otherwise no swap could ever produce output.
///
/// # Examples
///
/// ```
/// use qite_dex::config::{DepositPolicy, PoolConfig};
/// use qite_dex::domain::FeeTier;
///
/// let cfg = PoolConfig::new(FeeTier::TIER_0_30_PERCENT, DepositPolicy::Strict);
/// assert!(cfg.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    fee_tier: FeeTier,
    #[serde(default)]
    deposit_policy: DepositPolicy,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is out of range.
    pub fn new(fee_tier: FeeTier, deposit_policy: DepositPolicy) -> Result<Self, AmmError> {
        let config = Self {
            fee_tier,
            deposit_policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// Deserialized configs bypass [`new`](Self::new), so consumers call
    /// this before use.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee exceeds 10 000 bp or is
    /// exactly 100%.
    pub fn validate(&self) -> Result<(), AmmError> {
        let bps = self.fee_tier.basis_points();
        if !bps.is_valid_percent() {
            return Err(AmmError::InvalidFee("fee exceeds 10000 basis points"));
        }
        if bps == BasisPoints::MAX_PERCENT {
            return Err(AmmError::InvalidFee("a 100% fee leaves no swap output"));
        }
        Ok(())
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the deposit-ratio policy.
    #[must_use]
    pub const fn deposit_policy(&self) -> DepositPolicy {
        self.deposit_policy
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fee_tier: FeeTier::TIER_0_30_PERCENT,
            deposit_policy: DepositPolicy::Trim,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_bp_trim() {
        let cfg = PoolConfig::default();
        assert_eq!(cfg.fee_tier(), FeeTier::TIER_0_30_PERCENT);
        assert_eq!(cfg.deposit_policy(), DepositPolicy::Trim);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn fee_above_hundred_percent_rejected() {
        let Err(AmmError::InvalidFee(_)) =
            PoolConfig::new(FeeTier::new(BasisPoints::new(10_001)), DepositPolicy::Trim)
        else {
            panic!("expected InvalidFee");
        };
    }

    #[test]
    fn full_fee_rejected() {
        let result = PoolConfig::new(FeeTier::new(BasisPoints::MAX_PERCENT), DepositPolicy::Trim);
        assert!(result.is_err());
    }

    #[test]
    fn zero_fee_allowed() {
        assert!(PoolConfig::new(FeeTier::FREE, DepositPolicy::Strict).is_ok());
    }

    #[test]
    fn deserializes_with_default_policy() {
        let Ok(cfg) = serde_json::from_str::<PoolConfig>(r#"{"fee_tier":100}"#) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.fee_tier(), FeeTier::TIER_1_00_PERCENT);
        assert_eq!(cfg.deposit_policy(), DepositPolicy::Trim);
    }
}
