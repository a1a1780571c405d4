//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use qite_dex::prelude::*;
//! ```

pub use crate::config::{DepositPolicy, PoolConfig, RegistryConfig};
pub use crate::domain::{
    AccountId, Amount, AssetId, BasisPoints, Deposit, FeeTier, Price, Shares, ShareToken,
    SpotPrices, SwapDirection, SwapResult, Withdrawal,
};
pub use crate::error::{AmmError, Result};
pub use crate::events::{EventLog, NullSink, PoolEvent};
pub use crate::ledger::{MemoryAssetLedger, MemoryNativeBank};
pub use crate::math::CheckedArithmetic;
pub use crate::pools::{LiquidityPool, PoolSnapshot, PriceView};
pub use crate::registry::{PoolHandle, PoolRegistry, RegistrySnapshot};
pub use crate::traits::{
    AssetLedger, EventSink, NativeBank, Settlement, SharedAssetLedger, SharedNativeBank,
};
