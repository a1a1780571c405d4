//! Pool creation and lookup.
//!
//! The [`PoolRegistry`] creates exactly one [`LiquidityPool`](crate::pools::LiquidityPool)
//! per non-native asset and indexes it by [`AssetId`](crate::domain::AssetId).
//! It holds no financial logic: once a pool exists, callers interact with
//! its [`PoolHandle`] directly.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use qite_dex::config::RegistryConfig;
//! use qite_dex::domain::AssetId;
//! use qite_dex::error::AmmError;
//! use qite_dex::events::EventLog;
//! use qite_dex::ledger::{MemoryAssetLedger, MemoryNativeBank};
//! use qite_dex::registry::PoolRegistry;
//!
//! let mut registry = PoolRegistry::new(
//!     RegistryConfig::default(),
//!     Arc::new(MemoryNativeBank::new()),
//!     Arc::new(EventLog::new()),
//! )
//! .expect("valid config");
//! let asset = AssetId::from_bytes([1; 32]);
//! let ledger = Arc::new(MemoryAssetLedger::new(asset));
//!
//! let pool = registry.create_pool(asset, ledger.clone(), "Token1", "TK1").expect("created");
//! assert_eq!(registry.pool_count(), 1);
//! assert!(registry.get_pool(&asset).is_some());
//! assert_eq!(
//!     registry.create_pool(asset, ledger, "Token1", "TK1").map(|_| ()),
//!     Err(AmmError::DuplicatePool)
//! );
//! assert_eq!(pool.asset_id(), &asset);
//! ```

mod pool_registry;

pub use pool_registry::{PoolHandle, PoolRegistry, RegistrySnapshot};
