//! Destination for committed engine events.

use crate::events::PoolEvent;

/// Receives every [`PoolEvent`] after the operation that produced it has
/// fully committed.
///
/// Sinks are shared between the registry and all of its pools, so they
/// must be thread-safe.  Emission is infallible: a sink that cannot
/// deliver an event must buffer or drop it itself.
pub trait EventSink: Send + Sync {
    /// Records one event.
    fn emit(&self, event: &PoolEvent);
}
