//! Single-entry guard for pool mutations.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::error::AmmError;

/// Non-blocking "operation in progress" flag.
///
/// [`enter`](Self::enter) fails immediately instead of waiting, so a
/// callback from a ledger back into the same pool cannot observe or
/// mutate half-applied state.  The flag clears when the returned
/// [`Entered`] token drops, on every exit path.
#[derive(Debug, Default)]
pub(crate) struct ReentrancyGuard {
    locked: AtomicBool,
}

/// Proof that the guard is held.
#[derive(Debug)]
pub(crate) struct Entered<'a> {
    guard: &'a ReentrancyGuard,
}

impl ReentrancyGuard {
    /// # Errors
    ///
    /// Returns [`AmmError::Reentrancy`] if an operation is already in progress.
    pub(crate) fn enter(&self) -> Result<Entered<'_>, AmmError> {
        if self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            warn!("rejected re-entrant pool call");
            return Err(AmmError::Reentrancy);
        }
        Ok(Entered { guard: self })
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.guard.locked.store(false, Ordering::Release);
    }
}
