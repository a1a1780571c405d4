//! Per-pool share balances.

use std::collections::HashMap;

use crate::domain::{AccountId, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Owner → share balance map plus the outstanding total.
///
/// Only the owning pool mutates it.  Every method either applies fully or
/// leaves the ledger unchanged, so `Σ balances == total` holds after every
/// call.  Zero balances are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShareLedger {
    balances: HashMap<AccountId, Shares>,
    total: Shares,
}

impl ShareLedger {
    /// Rebuilds a ledger from persisted balances, recomputing the total.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::CorruptState`] on a duplicate owner or if the
    /// balances overflow.
    pub(crate) fn from_balances(entries: &[(AccountId, Shares)]) -> Result<Self, AmmError> {
        let mut ledger = Self::default();
        for (owner, amount) in entries {
            if ledger.balances.contains_key(owner) {
                return Err(AmmError::CorruptState("duplicate share holder"));
            }
            ledger
                .mint(owner, *amount)
                .map_err(|_| AmmError::CorruptState("share balances overflow"))?;
        }
        Ok(ledger)
    }

    pub(crate) fn total(&self) -> Shares {
        self.total
    }

    pub(crate) fn balance_of(&self, owner: &AccountId) -> Shares {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    /// Non-zero balances ordered by owner.
    pub(crate) fn holders(&self) -> Vec<(AccountId, Shares)> {
        let mut holders: Vec<_> = self.balances.iter().map(|(k, v)| (*k, *v)).collect();
        holders.sort_unstable_by_key(|(owner, _)| *owner);
        holders
    }

    pub(crate) fn mint(&mut self, owner: &AccountId, amount: Shares) -> Result<(), AmmError> {
        if amount.is_zero() {
            return Ok(());
        }
        let total = self.total.safe_add(&amount)?;
        let balance = self.balance_of(owner).safe_add(&amount)?;
        self.total = total;
        self.balances.insert(*owner, balance);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `owner` holds less than `amount`.
    pub(crate) fn burn(&mut self, owner: &AccountId, amount: Shares) -> Result<(), AmmError> {
        let remaining = self
            .balance_of(owner)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientShares)?;
        let total = self.total.safe_sub(&amount)?;
        self.total = total;
        self.set(owner, remaining);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `from` holds less than `amount`.
    pub(crate) fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        let from_remaining = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientShares)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(to).safe_add(&amount)?;
        self.set(from, from_remaining);
        self.set(to, to_balance);
        Ok(())
    }

    /// `true` when the balances sum exactly to the total.
    #[cfg(test)]
    pub(crate) fn is_conserved(&self) -> bool {
        let sum = self
            .balances
            .values()
            .try_fold(Shares::ZERO, |acc, s| acc.checked_add(s));
        sum == Some(self.total)
    }

    fn set(&mut self, owner: &AccountId, balance: Shares) {
        if balance.is_zero() {
            self.balances.remove(owner);
        } else {
            self.balances.insert(*owner, balance);
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const A: AccountId = AccountId::from_bytes([1; 32]);
    const B: AccountId = AccountId::from_bytes([2; 32]);

    fn ledger_with(a: u128, b: u128) -> ShareLedger {
        let mut ledger = ShareLedger::default();
        let Ok(()) = ledger.mint(&A, Shares::new(a)) else {
            panic!("mint a");
        };
        let Ok(()) = ledger.mint(&B, Shares::new(b)) else {
            panic!("mint b");
        };
        ledger
    }

    #[test]
    fn mint_and_burn_track_total() {
        let mut ledger = ledger_with(30, 70);
        assert_eq!(ledger.total(), Shares::new(100));
        let Ok(()) = ledger.burn(&A, Shares::new(30)) else {
            panic!("burn");
        };
        assert_eq!(ledger.total(), Shares::new(70));
        assert_eq!(ledger.holders(), vec![(B, Shares::new(70))]);
        assert!(ledger.is_conserved());
    }

    #[test]
    fn burn_more_than_held_is_rejected_unchanged() {
        let mut ledger = ledger_with(30, 70);
        let before = ledger.clone();
        assert_eq!(ledger.burn(&A, Shares::new(31)), Err(AmmError::InsufficientShares));
        assert_eq!(ledger, before);
    }

    #[test]
    fn transfer_moves_without_changing_total() {
        let mut ledger = ledger_with(30, 70);
        let Ok(()) = ledger.transfer(&B, &A, Shares::new(20)) else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance_of(&A), Shares::new(50));
        assert_eq!(ledger.balance_of(&B), Shares::new(50));
        assert_eq!(ledger.total(), Shares::new(100));
        assert!(ledger.is_conserved());
    }

    #[test]
    fn self_transfer_is_noop() {
        let mut ledger = ledger_with(30, 0);
        let before = ledger.clone();
        assert!(ledger.transfer(&A, &A, Shares::new(30)).is_ok());
        assert_eq!(ledger, before);
    }

    #[test]
    fn from_balances_rejects_duplicates() {
        let entries = [(A, Shares::new(1)), (A, Shares::new(2))];
        let Err(AmmError::CorruptState(_)) = ShareLedger::from_balances(&entries) else {
            panic!("expected CorruptState");
        };
    }

    #[test]
    fn holders_round_trip() {
        let ledger = ledger_with(5, 9);
        let Ok(rebuilt) = ShareLedger::from_balances(&ledger.holders()) else {
            panic!("rebuild");
        };
        assert_eq!(rebuilt, ledger);
    }
}
