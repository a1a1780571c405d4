//! Engine events.
//!
//! Every committed state change emits a [`PoolEvent`] to the configured
//! [`EventSink`].  Events are for external consumption (indexers, APIs);
//! the engine never reads them back.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, AssetId, Shares, SwapDirection};
use crate::traits::EventSink;

/// A committed engine state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    /// A pool was created for a new asset.
    PoolCreated {
        /// Non-native asset the pool trades.
        asset_id: AssetId,
        /// Address of the new pool.
        pool: AccountId,
    },

    /// Liquidity was deposited.
    LiquidityAdded {
        /// Pool address.
        pool: AccountId,
        /// Depositor credited with the shares.
        provider: AccountId,
        /// Native units drawn.
        native_amount: Amount,
        /// Asset units drawn.
        asset_amount: Amount,
        /// Shares minted.
        shares_minted: Shares,
    },

    /// Liquidity was withdrawn.
    LiquidityRemoved {
        /// Pool address.
        pool: AccountId,
        /// Withdrawer whose shares were burned.
        provider: AccountId,
        /// Native units paid out.
        native_amount: Amount,
        /// Asset units paid out.
        asset_amount: Amount,
        /// Shares burned.
        shares_burned: Shares,
    },

    /// A swap executed.
    Swapped {
        /// Pool address.
        pool: AccountId,
        /// Trader who paid in and was paid out.
        trader: AccountId,
        /// Direction of the trade.
        direction: SwapDirection,
        /// Input including fee.
        amount_in: Amount,
        /// Output paid.
        amount_out: Amount,
    },

    /// Shares moved between holders.
    SharesTransferred {
        /// Pool address.
        pool: AccountId,
        /// Sender.
        from: AccountId,
        /// Recipient.
        to: AccountId,
        /// Shares moved.
        amount: Shares,
    },
}

impl PoolEvent {
    /// Address of the pool the event concerns.
    #[must_use]
    pub const fn pool(&self) -> &AccountId {
        match self {
            Self::PoolCreated { pool, .. }
            | Self::LiquidityAdded { pool, .. }
            | Self::LiquidityRemoved { pool, .. }
            | Self::Swapped { pool, .. }
            | Self::SharesTransferred { pool, .. } => pool,
        }
    }

    /// Stable snake-case name of the event kind.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::PoolCreated { .. } => "pool_created",
            Self::LiquidityAdded { .. } => "liquidity_added",
            Self::LiquidityRemoved { .. } => "liquidity_removed",
            Self::Swapped { .. } => "swapped",
            Self::SharesTransferred { .. } => "shares_transferred",
        }
    }
}

/// In-memory [`EventSink`] that keeps every event in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<PoolEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<PoolEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns all recorded events.
    pub fn drain(&self) -> Vec<PoolEvent> {
        core::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: &PoolEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// [`EventSink`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &PoolEvent) {}
}
