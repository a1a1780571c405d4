//! # QITE DEX
//!
//! A constant-product exchange engine pairing one native unit with any
//! number of assets.  Each asset gets exactly one [`LiquidityPool`](pools::LiquidityPool),
//! created through the [`PoolRegistry`](registry::PoolRegistry).  Pools
//! issue their own share token to liquidity providers, charge a fixed
//! 0.30% swap fee that stays in the reserves, and expose spot prices.
//!
//! Balances live outside the engine.  Pools move value only through the
//! [`AssetLedger`](traits::AssetLedger) and [`NativeBank`](traits::NativeBank)
//! they were created with, and report committed changes to an
//! [`EventSink`](traits::EventSink).  In-memory implementations of all three
//! are provided in [`ledger`] and [`events`].
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use qite_dex::prelude::*;
//!
//! let alice = AccountId::from_bytes([1; 32]);
//! let asset_id = AssetId::from_bytes([7; 32]);
//!
//! let bank = Arc::new(MemoryNativeBank::new());
//! let ledger = Arc::new(MemoryAssetLedger::new(asset_id));
//!
//! let mut registry =
//!     PoolRegistry::new(RegistryConfig::default(), bank.clone(), Arc::new(EventLog::new()))
//!         .expect("valid config");
//! let pool = registry
//!     .create_pool(asset_id, ledger.clone(), "Token1", "TK1")
//!     .expect("new pool");
//!
//! bank.deposit(&alice, Amount::new(1_000)).expect("funded");
//! ledger.mint(&alice, Amount::new(10_000)).expect("minted");
//! ledger.approve(&alice, pool.address(), Amount::new(10_000));
//!
//! // 100 asset units per native unit.
//! pool.add_liquidity(&alice, Amount::new(10_000), Amount::new(100))
//!     .expect("bootstrap");
//!
//! let result = pool
//!     .swap_tokens(&alice, SwapDirection::NativeToAsset, Amount::new(10), Amount::new(1))
//!     .expect("swap");
//! assert!(result.amount_out() > Amount::ZERO);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Registry   │  one pool per asset, PoolCreated
//! └──────┬───────┘
//!        │ Arc<LiquidityPool>
//!        ▼
//! ┌──────────────┐      ┌──────────────────────────┐
//! │     Pool     │─────▶│ bound at creation        │
//! │ reserves,    │      │  NativeBank, AssetLedger │
//! │ share ledger │      └──────────────────────────┘
//! └──────┬───────┘
//!        │ PoolEvent after commit
//!        ▼
//! ┌──────────────┐
//! │  EventSink   │
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Price`](domain::Price), identifiers, receipts |
//! | [`pools`] | [`LiquidityPool`](pools::LiquidityPool), [`PriceView`](pools::PriceView), persistence |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) |
//! | [`traits`] | Collaborator seams: ledgers, value transfer, event sink |
//! | [`ledger`] | In-memory balance stores |
//! | [`events`] | [`PoolEvent`](events::PoolEvent) and sinks |
//! | [`config`] | Validated pool and registry configuration |
//! | [`math`] | Checked and 256-bit intermediate arithmetic |
//! | [`error`] | [`AmmError`](error::AmmError) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
