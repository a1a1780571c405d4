//! Registry-wide configuration.

use serde::{Deserialize, Serialize};

use super::PoolConfig;
use crate::error::AmmError;

/// Configuration applied to every pool a [`PoolRegistry`](crate::registry::PoolRegistry)
/// creates.
///
/// The fee rate is fixed per deployment; individual pools cannot override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pool: PoolConfig,
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolConfig::validate`] errors.
    pub fn new(pool: PoolConfig) -> Result<Self, AmmError> {
        let config = Self { pool };
        config.validate()?;
        Ok(config)
    }

    /// Validates the embedded pool configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolConfig::validate`] errors.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.pool.validate()
    }

    /// Returns the pool configuration every new pool receives.
    #[must_use]
    pub const fn pool(&self) -> PoolConfig {
        self.pool
    }
}
