//! In-memory fungible-asset ledger with allowances.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use super::{credit, move_balance};
use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

#[derive(Debug, Default)]
struct State {
    balances: HashMap<AccountId, Amount>,
    // (owner, spender) -> remaining allowance
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

/// Balance-and-allowance ledger for one fungible asset.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::{AccountId, Amount, AssetId};
/// use qite_dex::ledger::MemoryAssetLedger;
/// use qite_dex::traits::AssetLedger;
///
/// let ledger = MemoryAssetLedger::new(AssetId::from_bytes([7; 32]));
/// let alice = AccountId::from_bytes([1; 32]);
/// let bob = AccountId::from_bytes([2; 32]);
/// assert!(ledger.mint(&alice, Amount::new(100)).is_ok());
/// assert!(ledger.transfer(&alice, &bob, Amount::new(40)).is_ok());
/// assert_eq!(ledger.balance_of(&bob), Amount::new(40));
/// ```
#[derive(Debug)]
pub struct MemoryAssetLedger {
    asset_id: AssetId,
    state: Mutex<State>,
}

impl MemoryAssetLedger {
    /// Creates an empty ledger for `asset_id`.
    #[must_use]
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            state: Mutex::new(State::default()),
        }
    }

    /// Creates `amount` new units for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn mint(&self, owner: &AccountId, amount: Amount) -> Result<(), AmmError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        credit(&mut state.balances, owner, amount)
    }

    /// Sets the amount `spender` may move out of `owner`'s balance.
    pub fn approve(&self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.allowances.insert((*owner, *spender), amount);
    }

    /// Returns the remaining allowance of `spender` over `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }
}

impl AssetLedger for MemoryAssetLedger {
    fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    fn balance_of(&self, owner: &AccountId) -> Amount {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.balances.get(owner).copied().unwrap_or_default()
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        owner: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (*owner, *spender);
        let allowed = state.allowances.get(&key).copied().unwrap_or_default();
        if allowed < amount {
            return Err(AmmError::InsufficientAllowance);
        }
        move_balance(&mut state.balances, owner, recipient, amount)?;
        state.allowances.insert(key, allowed.safe_sub(&amount)?);
        trace!(%owner, %recipient, %amount, "asset transfer_from");
        Ok(())
    }

    fn transfer(
        &self,
        sender: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        move_balance(&mut state.balances, sender, recipient, amount)?;
        trace!(%sender, %recipient, %amount, "asset transfer");
        Ok(())
    }
}
