//! Serializable pool state for persistence.

use serde::{Deserialize, Serialize};

use crate::config::{DepositPolicy, PoolConfig};
use crate::domain::{AccountId, Amount, AssetId, BasisPoints, FeeTier, ShareToken, Shares};
use crate::error::AmmError;

/// Everything needed to rebuild a [`LiquidityPool`](super::LiquidityPool).
///
/// Share balances are stored as an owner-ordered list so the record
/// serializes deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Non-native asset the pool trades.
    pub asset_id: AssetId,
    /// Share-token metadata.
    pub share_token: ShareToken,
    /// Native reserve.
    pub reserve_native: Amount,
    /// Asset reserve.
    pub reserve_asset: Amount,
    /// Outstanding shares.
    pub total_shares: Shares,
    /// Swap fee in basis points.
    pub fee_bps: BasisPoints,
    /// Deposit-ratio policy.
    #[serde(default)]
    pub deposit_policy: DepositPolicy,
    /// Non-zero share balances ordered by owner.
    pub share_balances: Vec<(AccountId, Shares)>,
}

impl PoolSnapshot {
    /// Checks the reserve/share invariants and rebuilds the pool config.
    ///
    /// The share-ledger sum is checked separately when the ledger is
    /// rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::CorruptState`] on any violation.
    pub(crate) fn validated_config(&self) -> Result<PoolConfig, AmmError> {
        let config = PoolConfig::new(FeeTier::new(self.fee_bps), self.deposit_policy)
            .map_err(|_| AmmError::CorruptState("fee out of range"))?;
        let native_empty = self.reserve_native.is_zero();
        let asset_empty = self.reserve_asset.is_zero();
        if self.total_shares.is_zero() {
            if !native_empty || !asset_empty {
                return Err(AmmError::CorruptState("reserves without shares"));
            }
        } else if native_empty || asset_empty {
            return Err(AmmError::CorruptState("shares outstanding against an empty reserve"));
        }
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn snapshot(native: u128, asset: u128, total: u128) -> PoolSnapshot {
        PoolSnapshot {
            asset_id: AssetId::from_bytes([7; 32]),
            share_token: ShareToken::new("Token1", "TK1"),
            reserve_native: Amount::new(native),
            reserve_asset: Amount::new(asset),
            total_shares: Shares::new(total),
            fee_bps: BasisPoints::new(30),
            deposit_policy: DepositPolicy::Trim,
            share_balances: Vec::new(),
        }
    }

    #[test]
    fn empty_and_active_states_accepted() {
        assert!(snapshot(0, 0, 0).validated_config().is_ok());
        assert!(snapshot(10, 100, 31).validated_config().is_ok());
    }

    #[test]
    fn one_sided_reserves_rejected() {
        for s in [snapshot(10, 0, 5), snapshot(0, 10, 0), snapshot(0, 0, 5)] {
            let Err(AmmError::CorruptState(_)) = s.validated_config() else {
                panic!("expected CorruptState");
            };
        }
    }

    #[test]
    fn bad_fee_rejected() {
        let mut s = snapshot(0, 0, 0);
        s.fee_bps = BasisPoints::new(10_000);
        assert!(s.validated_config().is_err());
    }
}
