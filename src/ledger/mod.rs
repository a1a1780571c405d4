//! In-memory reference implementations of the balance stores.
//!
//! [`MemoryAssetLedger`] and [`MemoryNativeBank`] back the integration
//! tests and the demo, and serve hosts that keep balances in process.
//! Each store guards its maps with one mutex, so every transfer is
//! checked and applied atomically.

mod asset;
mod native;

pub use asset::MemoryAssetLedger;
pub use native::MemoryNativeBank;

use std::collections::HashMap;

use crate::domain::{AccountId, Amount};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Debits `from` and credits `to` in one balance map, or changes nothing.
fn move_balance(
    balances: &mut HashMap<AccountId, Amount>,
    from: &AccountId,
    to: &AccountId,
    amount: Amount,
) -> Result<(), AmmError> {
    let from_balance = balances.get(from).copied().unwrap_or_default();
    if from_balance < amount {
        return Err(AmmError::InsufficientBalance);
    }
    if from == to {
        return Ok(());
    }
    let to_balance = balances.get(to).copied().unwrap_or_default();
    let credited = to_balance.safe_add(&amount)?;
    balances.insert(*from, from_balance.safe_sub(&amount)?);
    balances.insert(*to, credited);
    Ok(())
}

fn credit(
    balances: &mut HashMap<AccountId, Amount>,
    owner: &AccountId,
    amount: Amount,
) -> Result<(), AmmError> {
    let entry = balances.entry(*owner).or_default();
    *entry = entry.safe_add(&amount)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const A: AccountId = AccountId::from_bytes([1; 32]);
    const B: AccountId = AccountId::from_bytes([2; 32]);

    #[test]
    fn move_balance_is_all_or_nothing() {
        let mut balances = HashMap::new();
        balances.insert(A, Amount::new(10));
        assert_eq!(
            move_balance(&mut balances, &A, &B, Amount::new(11)),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(balances.get(&A), Some(&Amount::new(10)));
        assert!(balances.get(&B).is_none());

        let Ok(()) = move_balance(&mut balances, &A, &B, Amount::new(4)) else {
            panic!("expected Ok");
        };
        assert_eq!(balances.get(&A), Some(&Amount::new(6)));
        assert_eq!(balances.get(&B), Some(&Amount::new(4)));
    }

    #[test]
    fn credit_overflow_leaves_balance() {
        let mut balances = HashMap::new();
        balances.insert(A, Amount::MAX);
        assert!(credit(&mut balances, &A, Amount::new(1)).is_err());
        assert_eq!(balances.get(&A), Some(&Amount::MAX));
    }
}
