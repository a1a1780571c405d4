//! Constant-product pricing and proportional share math.
//!
//! Pure functions over reserve values; no state, no I/O.  Every quotient
//! rounds in the pool's favor:
//!
//! | Quantity | Rounding |
//! |----------|----------|
//! | swap fee | up |
//! | swap output | down |
//! | counter-amount matched on deposit | up |
//! | shares minted | down |
//! | value drawn per minted share | up |
//! | withdrawal payout | down |
//!
//! # Swap
//!
//! 1. `fee = ceil(amount_in × fee_bps / 10 000)`
//! 2. `net = amount_in − fee`
//! 3. `amount_out = floor(reserve_out × net / (reserve_in + net))`
//! 4. `reserve_in += amount_in` (fee stays in the pool)
//! 5. `reserve_out −= amount_out`
//!
//! After every swap `k_after ≥ k_before`, because the fee enters the input
//! reserve without a corresponding output.

use core::cmp::min;

use primitive_types::U256;

use crate::config::DepositPolicy;
use crate::domain::{Amount, FeeTier, Rounding, Shares};
use crate::error::AmmError;
use crate::math::{isqrt_product, mul_div, CheckedArithmetic};

/// Output and fee for an exact-in swap: `(amount_out, fee)`.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if either reserve is empty, the
///   output rounds to zero, or the output would consume the whole output
///   reserve.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub(crate) fn swap_output(
    fee_tier: FeeTier,
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
) -> Result<(Amount, Amount), AmmError> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let (net_input, fee) = fee_tier.split_input(amount_in)?;
    let denominator = reserve_in.safe_add(&net_input)?;
    let amount_out = Amount::new(mul_div(
        reserve_out.get(),
        net_input.get(),
        denominator.get(),
        Rounding::Down,
    )?);

    if amount_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    Ok((amount_out, fee))
}

/// Shares minted by the first deposit into an empty pool:
/// `floor(sqrt(asset × native))`.
///
/// # Errors
///
/// Returns [`AmmError::Validation`] if the geometric mean floors to zero.
pub(crate) fn bootstrap_shares(asset: Amount, native: Amount) -> Result<Shares, AmmError> {
    let minted = isqrt_product(asset.get(), native.get())?;
    if minted == 0 {
        return Err(AmmError::Validation("deposit too small to mint shares"));
    }
    Ok(Shares::new(minted))
}

/// Amounts actually drawn from an offered deposit into an active pool:
/// `(asset_used, native_used)`.
///
/// # Errors
///
/// - [`AmmError::RatioMismatch`] under [`DepositPolicy::Strict`] when
///   `native` is neither the floor nor the ceiling of the ratio-implied
///   counter-amount.
/// - [`AmmError::InsufficientLiquidity`] if a reserve is empty.
pub(crate) fn match_deposit(
    policy: DepositPolicy,
    asset: Amount,
    native: Amount,
    reserve_asset: Amount,
    reserve_native: Amount,
) -> Result<(Amount, Amount), AmmError> {
    if reserve_asset.is_zero() || reserve_native.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let implied = |rounding| {
        mul_div(asset.get(), reserve_native.get(), reserve_asset.get(), rounding).map(Amount::new)
    };
    match policy {
        DepositPolicy::Strict => {
            if native == implied(Rounding::Down)? || native == implied(Rounding::Up)? {
                Ok((asset, native))
            } else {
                Err(AmmError::RatioMismatch)
            }
        }
        DepositPolicy::Trim => {
            let native_needed = implied(Rounding::Up)?;
            if native_needed <= native {
                return Ok((asset, native_needed));
            }
            let asset_needed = Amount::new(mul_div(
                native.get(),
                reserve_asset.get(),
                reserve_native.get(),
                Rounding::Up,
            )?);
            if asset_needed > asset {
                return Err(AmmError::RatioMismatch);
            }
            Ok((asset_needed, native))
        }
    }
}

/// Shares minted for a proportional deposit:
/// `min(asset × T / Ra, native × T / Rn)`, rounded down.
///
/// # Errors
///
/// Returns [`AmmError::Validation`] if the result is zero.
pub(crate) fn proportional_shares(
    asset: Amount,
    native: Amount,
    reserve_asset: Amount,
    reserve_native: Amount,
    total: Shares,
) -> Result<Shares, AmmError> {
    let by_asset = mul_div(asset.get(), total.get(), reserve_asset.get(), Rounding::Down)?;
    let by_native = mul_div(native.get(), total.get(), reserve_native.get(), Rounding::Down)?;
    let minted = min(by_asset, by_native);
    if minted == 0 {
        return Err(AmmError::Validation("deposit too small to mint shares"));
    }
    Ok(Shares::new(minted))
}

/// Value actually drawn for `minted` shares of an active pool:
/// `(asset_cost, native_cost)`, each `ceil(reserve × minted / total)` and
/// never more than the matched amount for that side.
///
/// Charging for the shares rather than the whole matched offer keeps the
/// provider's loss on an immediate withdrawal within one unit per side.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if `total` is zero.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub(crate) fn deposit_cost(
    minted: Shares,
    total: Shares,
    reserve_asset: Amount,
    reserve_native: Amount,
    asset_matched: Amount,
    native_matched: Amount,
) -> Result<(Amount, Amount), AmmError> {
    if total.is_zero() {
        return Err(AmmError::InsufficientLiquidity);
    }
    let cost = |reserve: Amount| {
        mul_div(reserve.get(), minted.get(), total.get(), Rounding::Up).map(Amount::new)
    };
    let asset_cost = min(cost(reserve_asset)?, asset_matched);
    let native_cost = min(cost(reserve_native)?, native_matched);
    Ok((asset_cost, native_cost))
}

/// Payout for burning `shares` of `total`: `(native_out, asset_out)`,
/// each `floor(reserve × shares / total)`.
///
/// # Errors
///
/// - [`AmmError::InsufficientShares`] if `shares > total`.
/// - [`AmmError::Validation`] if both payouts round to zero.
pub(crate) fn withdrawal_amounts(
    shares: Shares,
    total: Shares,
    reserve_native: Amount,
    reserve_asset: Amount,
) -> Result<(Amount, Amount), AmmError> {
    if shares > total || total.is_zero() {
        return Err(AmmError::InsufficientShares);
    }
    let native_out = mul_div(reserve_native.get(), shares.get(), total.get(), Rounding::Down)?;
    let asset_out = mul_div(reserve_asset.get(), shares.get(), total.get(), Rounding::Down)?;
    if native_out == 0 && asset_out == 0 {
        return Err(AmmError::Validation("share amount too small to withdraw anything"));
    }
    Ok((Amount::new(native_out), Amount::new(asset_out)))
}

/// The invariant `k = reserve_native × reserve_asset` in 256-bit precision.
pub(crate) fn invariant(reserve_native: Amount, reserve_asset: Amount) -> U256 {
    // Two u128 factors cannot saturate 256 bits.
    U256::from(reserve_native.get()).saturating_mul(U256::from(reserve_asset.get()))
}
