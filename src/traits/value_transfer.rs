//! Uniform value-movement capability over both pool sides.
//!
//! Pool logic moves value through [`ValueTransfer`] only, picking the
//! implementation for a [`Side`] from a [`Settlement`].  Deposit, swap, and
//! withdrawal therefore never branch on whether a leg is the native unit
//! or the pooled asset.
//!
//! # Examples
//!
//! ```
//! use qite_dex::domain::{AccountId, Amount, AssetId, Side};
//! use qite_dex::ledger::{MemoryAssetLedger, MemoryNativeBank};
//! use qite_dex::traits::{AssetLedger, Settlement};
//!
//! let bank = MemoryNativeBank::new();
//! let ledger = MemoryAssetLedger::new(AssetId::from_bytes([7; 32]));
//! let alice = AccountId::from_bytes([1; 32]);
//! let pool = AccountId::from_bytes([9; 32]);
//! assert!(ledger.mint(&alice, Amount::new(50)).is_ok());
//! ledger.approve(&alice, &pool, Amount::new(50));
//!
//! let settlement = Settlement::new(&bank, &ledger);
//! assert!(settlement.side(Side::Asset).pull(&alice, &pool, Amount::new(20)).is_ok());
//! assert_eq!(ledger.balance_of(&pool), Amount::new(20));
//! ```

use super::{AssetLedger, NativeBank};
use crate::domain::{AccountId, Amount, Side};
use crate::error::AmmError;

/// Moves value of one kind into and out of a pool.
pub trait ValueTransfer {
    /// Draws `amount` from `payer` into `pool`.
    ///
    /// # Errors
    ///
    /// Propagates the underlying store's balance or allowance errors.
    fn pull(&self, payer: &AccountId, pool: &AccountId, amount: Amount) -> Result<(), AmmError>;

    /// Pays `amount` out of `pool` to `recipient`.
    ///
    /// # Errors
    ///
    /// Propagates the underlying store's balance errors.
    fn push(&self, pool: &AccountId, recipient: &AccountId, amount: Amount)
        -> Result<(), AmmError>;
}

/// [`ValueTransfer`] over an [`AssetLedger`].  Pulls are allowance-gated
/// with the pool as spender.
#[derive(Debug)]
pub struct AssetSide<'a, L: ?Sized>(pub &'a L);

impl<L: AssetLedger + ?Sized> ValueTransfer for AssetSide<'_, L> {
    fn pull(&self, payer: &AccountId, pool: &AccountId, amount: Amount) -> Result<(), AmmError> {
        self.0.transfer_from(pool, payer, pool, amount)
    }

    fn push(
        &self,
        pool: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.0.transfer(pool, recipient, amount)
    }
}

/// [`ValueTransfer`] over a [`NativeBank`].
#[derive(Debug)]
pub struct NativeSide<'a, N: ?Sized>(pub &'a N);

impl<N: NativeBank + ?Sized> ValueTransfer for NativeSide<'_, N> {
    fn pull(&self, payer: &AccountId, pool: &AccountId, amount: Amount) -> Result<(), AmmError> {
        self.0.accept(payer, pool, amount)
    }

    fn push(
        &self,
        pool: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.0.pay(pool, recipient, amount)
    }
}

/// The pair of stores a pool operation settles against.
#[derive(Debug)]
pub struct Settlement<'a, N: ?Sized, L: ?Sized> {
    native: NativeSide<'a, N>,
    asset: AssetSide<'a, L>,
}

impl<'a, N, L> Settlement<'a, N, L>
where
    N: NativeBank + ?Sized,
    L: AssetLedger + ?Sized,
{
    /// Pairs a native bank with the pooled asset's ledger.
    pub const fn new(native: &'a N, asset: &'a L) -> Self {
        Self {
            native: NativeSide(native),
            asset: AssetSide(asset),
        }
    }

    /// Returns the transfer capability for `side`.
    pub fn side(&self, side: Side) -> &dyn ValueTransfer {
        match side {
            Side::Native => &self.native,
            Side::Asset => &self.asset,
        }
    }
}
