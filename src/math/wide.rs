//! 256-bit intermediate arithmetic.
//!
//! Reserve products overflow `u128` as soon as both sides hold more than
//! ~1.8e19 units, which is under twenty whole tokens at 18 decimals.
//! These helpers widen to [`U256`] for the product and narrow back with a
//! bounds check.

use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::AmmError;

const U128_MAX: U256 = U256([u64::MAX, u64::MAX, 0, 0]);

fn narrow(value: U256) -> Result<u128, AmmError> {
    if value > U128_MAX {
        return Err(AmmError::Overflow("result exceeds u128"));
    }
    Ok(value.low_u128())
}

/// Computes `a × b / c` with a 256-bit intermediate and explicit rounding.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `c` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::Rounding;
/// use qite_dex::math::mul_div;
///
/// let big = 10u128.pow(20);
/// assert_eq!(mul_div(big, big, big, Rounding::Down), Ok(big));
/// assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
/// ```
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Result<u128, AmmError> {
    if c == 0 {
        return Err(AmmError::DivisionByZero);
    }
    // Two u128 factors always fit in 256 bits.
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(AmmError::Overflow("mul_div product overflow"))?;
    let (quotient, remainder) = product.div_mod(U256::from(c));
    let quotient = if rounding.is_up() && !remainder.is_zero() {
        quotient
            .checked_add(U256::one())
            .ok_or(AmmError::Overflow("mul_div rounding overflow"))?
    } else {
        quotient
    };
    narrow(quotient)
}

/// Floor of `sqrt(a × b)`, computed without overflow.
///
/// The result always fits in `u128` because `sqrt(u128::MAX²) = u128::MAX`.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] only if the internal bound check fails,
/// which cannot happen for valid inputs.
pub fn isqrt_product(a: u128, b: u128) -> Result<u128, AmmError> {
    let product = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(AmmError::Overflow("isqrt product overflow"))?;
    narrow(product.integer_sqrt())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rejects_zero_divisor() {
        assert_eq!(mul_div(1, 1, 0, Rounding::Down), Err(AmmError::DivisionByZero));
    }

    #[test]
    fn mul_div_exceeds_u128_products() {
        // 1e30 * 1e30 / 1e20 = 1e40 > u128::MAX
        let e30 = 10u128.pow(30);
        let Err(AmmError::Overflow(_)) = mul_div(e30, e30, 10u128.pow(20), Rounding::Down) else {
            panic!("expected Overflow");
        };
        // 1e30 * 1e30 / 1e25 = 1e35 fits
        assert_eq!(
            mul_div(e30, e30, 10u128.pow(25), Rounding::Down),
            Ok(10u128.pow(35))
        );
    }

    #[test]
    fn mul_div_rounding() {
        assert_eq!(mul_div(7, 3, 2, Rounding::Down), Ok(10));
        assert_eq!(mul_div(7, 3, 2, Rounding::Up), Ok(11));
        assert_eq!(mul_div(6, 3, 2, Rounding::Up), Ok(9));
    }

    #[test]
    fn isqrt_small_values() {
        assert_eq!(isqrt_product(100, 10), Ok(31));
        assert_eq!(isqrt_product(4, 9), Ok(6));
        assert_eq!(isqrt_product(0, 9), Ok(0));
    }

    #[test]
    fn isqrt_max() {
        assert_eq!(isqrt_product(u128::MAX, u128::MAX), Ok(u128::MAX));
    }

    #[test]
    fn isqrt_eighteen_decimals() {
        let e18 = 10u128.pow(18);
        // sqrt(10e18 * 100e18) = sqrt(1000) * 1e18 = 31.6227766... e18
        let Ok(root) = isqrt_product(10 * e18, 100 * e18) else {
            panic!("expected Ok");
        };
        assert_eq!(root, 31_622_776_601_683_793_319);
    }
}
