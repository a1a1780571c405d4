//! The constant-product liquidity pool.
//!
//! A [`LiquidityPool`] pairs the native unit with one asset.  It holds both
//! reserves, keeps the ledger of its own share token, and settles every
//! operation against the native bank and asset ledger it was created with.
//! [`PriceView`] derives spot prices from reserves and
//! [`PoolSnapshot`] is the persisted form of a pool.
//!
//! # Lifecycle
//!
//! A pool starts *Empty* (no reserves, no shares).  The first deposit sets
//! the price and makes it *Active*.  Withdrawing every share returns it to
//! *Empty*, after which the next deposit bootstraps again.

mod curve;
mod guard;
mod liquidity_pool;
mod price_view;
mod share_ledger;
mod snapshot;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use liquidity_pool::{pool_address, LiquidityPool};
pub use price_view::PriceView;
pub use snapshot::PoolSnapshot;
