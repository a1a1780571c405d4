//! Validated configuration for pools and the registry.
//!
//! Configuration follows a validate-on-construct pattern: `new` returns
//! `Result` and rejects out-of-range values, and deserialized values are
//! re-checked with `validate` before use.

mod pool_config;
mod registry_config;

pub use pool_config::{DepositPolicy, PoolConfig};
pub use registry_config::RegistryConfig;
