//! In-memory native-unit bank.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::trace;

use super::{credit, move_balance};
use crate::domain::{AccountId, Amount};
use crate::error::AmmError;
use crate::traits::NativeBank;

/// Native balances keyed by account.
///
/// Native value needs no allowance: [`accept`](NativeBank::accept) models
/// value the payer attached to the call itself.
#[derive(Debug, Default)]
pub struct MemoryNativeBank {
    balances: Mutex<HashMap<AccountId, Amount>>,
}

impl MemoryNativeBank {
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `owner` with `amount` of fresh native value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn deposit(&self, owner: &AccountId, amount: Amount) -> Result<(), AmmError> {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        credit(&mut balances, owner, amount)
    }
}

impl NativeBank for MemoryNativeBank {
    fn balance_of(&self, owner: &AccountId) -> Amount {
        let balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        balances.get(owner).copied().unwrap_or_default()
    }

    fn accept(
        &self,
        payer: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        move_balance(&mut balances, payer, recipient, amount)?;
        trace!(%payer, %recipient, %amount, "native value accepted");
        Ok(())
    }

    fn pay(
        &self,
        sender: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let mut balances = self.balances.lock().unwrap_or_else(PoisonError::into_inner);
        move_balance(&mut balances, sender, recipient, amount)?;
        trace!(%sender, %recipient, %amount, "native payment");
        Ok(())
    }
}
