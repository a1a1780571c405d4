//! Collaborator abstractions the engine consumes.
//!
//! The engine owns pool state only.  Everything outside it is reached
//! through these traits: [`AssetLedger`] and [`NativeBank`] for balances,
//! [`ValueTransfer`] as the uniform capability pool logic settles through,
//! and [`EventSink`] for committed events.

mod asset_ledger;
mod event_sink;
mod value_transfer;

pub use asset_ledger::{AssetLedger, NativeBank, SharedAssetLedger, SharedNativeBank};
pub use event_sink::EventSink;
pub use value_transfer::{AssetSide, NativeSide, Settlement, ValueTransfer};
