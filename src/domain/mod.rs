//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model the exchange: raw
//! amounts, pool shares, fee rates, identifiers, swap direction, and the
//! receipts operations hand back.  All types are newtypes or small
//! records with validated constructors where an invariant exists.

mod account_id;
mod amount;
mod basis_points;
mod fee_tier;
mod liquidity_receipt;
mod price;
mod rounding;
mod shares;
mod side;
mod swap_result;

pub use account_id::{AccountId, AssetId};
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub(crate) use basis_points::BPS_DENOMINATOR;
pub use fee_tier::FeeTier;
pub use liquidity_receipt::{Deposit, ShareToken, Withdrawal};
pub use price::{Price, SpotPrices};
pub use rounding::Rounding;
pub use shares::Shares;
pub use side::{Side, SwapDirection};
pub use swap_result::SwapResult;
