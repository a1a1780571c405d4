//! [`PoolRegistry`] implementation.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::domain::{AssetId, ShareToken};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::pools::{LiquidityPool, PoolSnapshot};
use crate::traits::{EventSink, SharedAssetLedger, SharedNativeBank};

/// Shared, stable handle to a registered pool.
pub type PoolHandle = Arc<LiquidityPool>;

/// Persisted registry: every pool in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Pool records, oldest first.
    pub pools: Vec<PoolSnapshot>,
}

/// One pool per asset, indexed by asset id and kept in creation order.
///
/// Every pool shares the registry's native bank and is bound to the asset
/// ledger supplied when it is created.
///
/// Creation takes `&mut self`; hosts sharing a registry across threads wrap
/// it in their own lock.  Lookups hand out [`PoolHandle`]s that stay valid
/// for the life of the process.
pub struct PoolRegistry {
    config: RegistryConfig,
    native: SharedNativeBank,
    events: Arc<dyn EventSink>,
    by_asset: HashMap<AssetId, PoolHandle>,
    all_pools: Vec<PoolHandle>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryConfig::validate`] errors.
    pub fn new(
        config: RegistryConfig,
        native: SharedNativeBank,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config,
            native,
            events,
            by_asset: HashMap::new(),
            all_pools: Vec::new(),
        })
    }

    /// Creates the pool for `asset_id` with the registry's fixed fee,
    /// settling asset legs against `ledger`.
    ///
    /// Emits [`PoolEvent::PoolCreated`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::DuplicatePool`] if `asset_id` already has a pool.
    /// - [`AmmError::Validation`] if the share name or symbol is empty, or
    ///   `ledger` keeps a different asset.
    pub fn create_pool(
        &mut self,
        asset_id: AssetId,
        ledger: SharedAssetLedger,
        share_name: &str,
        share_symbol: &str,
    ) -> Result<PoolHandle, AmmError> {
        debug!(asset = %asset_id, share_name, share_symbol, "create_pool");
        if self.by_asset.contains_key(&asset_id) {
            warn!(asset = %asset_id, "pool already exists");
            return Err(AmmError::DuplicatePool);
        }
        if share_name.trim().is_empty() || share_symbol.trim().is_empty() {
            return Err(AmmError::Validation("share name and symbol must not be empty"));
        }

        let pool = Arc::new(LiquidityPool::new(
            asset_id,
            ShareToken::new(share_name, share_symbol),
            self.config.pool(),
            Arc::clone(&self.native),
            ledger,
            Arc::clone(&self.events),
        )?);
        self.insert(Arc::clone(&pool));

        let event = PoolEvent::PoolCreated {
            asset_id,
            pool: *pool.address(),
        };
        info!(asset = %asset_id, pool = %pool.address(), event = event.event_type(), "pool event");
        self.events.emit(&event);
        Ok(pool)
    }

    /// Looks up the pool for `asset_id`.
    #[must_use]
    pub fn get_pool(&self, asset_id: &AssetId) -> Option<PoolHandle> {
        self.by_asset.get(asset_id).cloned()
    }

    /// Like [`get_pool`](Self::get_pool) but fails when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] if no pool exists for `asset_id`.
    pub fn pool(&self, asset_id: &AssetId) -> Result<PoolHandle, AmmError> {
        self.get_pool(asset_id).ok_or(AmmError::PoolNotFound)
    }

    /// Number of pools created.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.all_pools.len()
    }

    /// The `index`-th pool in creation order.
    #[must_use]
    pub fn pool_at(&self, index: usize) -> Option<PoolHandle> {
        self.all_pools.get(index).cloned()
    }

    /// All pools in creation order.
    #[must_use]
    pub fn all_pools(&self) -> &[PoolHandle] {
        &self.all_pools
    }

    /// The configuration every new pool receives.
    #[must_use]
    pub const fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Captures every pool for persistence.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            pools: self.all_pools.iter().map(|p| p.snapshot()).collect(),
        }
    }

    /// Rebuilds a registry from a [`RegistrySnapshot`].
    ///
    /// `ledger_for` supplies the asset ledger for each restored pool.  No
    /// events are emitted; the restored pools already existed.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DuplicatePool`] if two records share an asset id.
    /// - [`AmmError::CorruptState`] if any pool record is invalid.
    /// - [`AmmError::Validation`] if `ledger_for` has no ledger for a
    ///   record's asset, or returns one for a different asset.
    pub fn restore<F>(
        config: RegistryConfig,
        snapshot: RegistrySnapshot,
        native: SharedNativeBank,
        ledger_for: F,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, AmmError>
    where
        F: Fn(&AssetId) -> Option<SharedAssetLedger>,
    {
        let mut registry = Self::new(config, native, events)?;
        for record in snapshot.pools {
            if registry.by_asset.contains_key(&record.asset_id) {
                return Err(AmmError::DuplicatePool);
            }
            let Some(ledger) = ledger_for(&record.asset_id) else {
                warn!(asset = %record.asset_id, "no ledger for restored pool");
                return Err(AmmError::Validation("no asset ledger for restored pool"));
            };
            let pool = LiquidityPool::from_snapshot(
                record,
                Arc::clone(&registry.native),
                ledger,
                Arc::clone(&registry.events),
            )?;
            registry.insert(Arc::new(pool));
        }
        info!(pools = registry.pool_count(), "registry restored");
        Ok(registry)
    }

    fn insert(&mut self, pool: PoolHandle) {
        self.by_asset.insert(*pool.asset_id(), Arc::clone(&pool));
        self.all_pools.push(pool);
    }
}

impl fmt::Debug for PoolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("config", &self.config)
            .field("pools", &self.all_pools)
            .finish_non_exhaustive()
    }
}
