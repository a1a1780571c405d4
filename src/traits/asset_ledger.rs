//! External balance stores the engine settles against.
//!
//! The engine does not own either store.  [`AssetLedger`] models the
//! fungible-asset contract for the pooled asset (balances plus
//! allowance-gated transfer), and [`NativeBank`] models the chain's
//! native unit, where value is attached to a call instead of approved in
//! advance.
//!
//! Both traits take `&self`: implementations live behind shared handles
//! and use interior mutability, the same way a host chain exposes its
//! token contracts.  A pool is bound to its two stores when it is
//! created and never settles against any other.  Reference in-memory
//! implementations live in [`crate::ledger`].

use std::sync::Arc;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;

/// Shared handle to the ledger of one pooled asset.
pub type SharedAssetLedger = Arc<dyn AssetLedger + Send + Sync>;

/// Shared handle to the native-unit bank.
pub type SharedNativeBank = Arc<dyn NativeBank + Send + Sync>;

/// Fungible-asset ledger for the non-native side of a pool.
pub trait AssetLedger {
    /// The asset whose balances this ledger keeps.
    fn asset_id(&self) -> AssetId;

    /// Returns the balance held by `owner`.
    fn balance_of(&self, owner: &AccountId) -> Amount;

    /// Moves `amount` from `owner` to `recipient` on behalf of `spender`,
    /// consuming allowance granted by `owner` to `spender`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if `spender` may not move that much.
    /// - [`AmmError::InsufficientBalance`] if `owner` does not hold that much.
    fn transfer_from(
        &self,
        spender: &AccountId,
        owner: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Moves `amount` from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `sender` does not hold
    /// that much.
    fn transfer(
        &self,
        sender: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;
}

/// Native-unit transfer primitive.
pub trait NativeBank {
    /// Returns the native balance held by `owner`.
    fn balance_of(&self, owner: &AccountId) -> Amount;

    /// Accepts `amount` of value attached by `payer` to a call on `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `payer` cannot cover it.
    fn accept(
        &self,
        payer: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Pays `amount` from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `sender` cannot cover it.
    fn pay(&self, sender: &AccountId, recipient: &AccountId, amount: Amount)
        -> Result<(), AmmError>;
}
