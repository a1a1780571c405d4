//! Unified error types for the Qite DEX engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Every error aborts the operation that raised it with no partial state
//! change.  Nothing here is fatal to the engine: a failed call never
//! corrupts pool state for subsequent callers, and the caller is expected
//! to resubmit with corrected parameters.

use thiserror::Error;

use crate::domain::Amount;

/// Crate-wide error enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Malformed or zero arguments.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// A pool for this asset already exists in the registry.
    #[error("a pool for this asset already exists")]
    DuplicatePool,

    /// No pool is registered for the requested asset.
    #[error("pool not found")]
    PoolNotFound,

    /// A deposit deviates from the current reserve ratio beyond rounding tolerance.
    #[error("deposit ratio does not match the pool reserve ratio")]
    RatioMismatch,

    /// Swap output fell below the caller's floor.
    #[error("slippage exceeded: output {amount_out} is below minimum {min_amount_out}")]
    SlippageExceeded {
        /// Output the swap would have produced.
        amount_out: Amount,
        /// Minimum output requested by the caller.
        min_amount_out: Amount,
    },

    /// The operation would drain a reserve to an invalid state or divide by
    /// an empty reserve.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// Share balance too low for the requested burn or transfer.
    #[error("insufficient shares")]
    InsufficientShares,

    /// Payer balance too low on the asset ledger or native bank.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The pool has not been authorized to move enough of the payer's asset.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// A mutating call re-entered a pool that already has an operation in progress.
    #[error("pool operation already in progress")]
    Reentrancy,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Fee rate is outside the supported range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Price value is not finite or negative.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// Pool state violates an invariant (restored snapshot or post-swap check).
    #[error("corrupt pool state: {0}")]
    CorruptState(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
