//! Rounding helpers for integer division.
//!
//! This module provides [`div_round`], a free function that performs `u128`
//! division with an explicit [`Rounding`] direction.  It is the low-level
//! building block used by [`Amount`](crate::domain::Amount) and
//! [`BasisPoints`](crate::domain::BasisPoints).
//!
//! # Convention
//!
//! Rounding always favors the pool:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal payout, minted shares | [`Rounding::Down`] |
//! | Swap fee, counter-deposit | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use qite_dex::domain::Rounding;
//! use qite_dex::math::div_round;
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

use crate::domain::Rounding;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a remainder implies denominator > 1.
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}
