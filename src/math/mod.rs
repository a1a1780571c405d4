//! Arithmetic utilities for pool calculations.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on domain wrappers, [`div_round`] for explicit division rounding, and
//! 256-bit helpers ([`mul_div`], [`isqrt_product`]) for the products of two
//! reserves, which routinely exceed `u128` with 18-decimal assets.

mod checked;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::div_round;
pub use wide::{isqrt_product, mul_div};
