//! Spot prices from current reserves.

use crate::domain::{Amount, Price, SpotPrices};
use crate::error::AmmError;

/// Read-only price derivation.  Holds no state of its own.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::Amount;
/// use qite_dex::pools::PriceView;
///
/// let prices = PriceView::from_reserves(Amount::new(10), Amount::new(100)).expect("active");
/// assert!((prices.asset_in_native.get() - 0.1).abs() < 1e-12);
/// assert!((prices.native_in_asset.get() - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceView;

impl PriceView {
    /// Prices implied by `reserve_native` and `reserve_asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if either reserve is zero.
    pub fn from_reserves(
        reserve_native: Amount,
        reserve_asset: Amount,
    ) -> Result<SpotPrices, AmmError> {
        if reserve_native.is_zero() || reserve_asset.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        Ok(SpotPrices {
            asset_in_native: Price::from_amounts(reserve_native, reserve_asset)?,
            native_in_asset: Price::from_amounts(reserve_asset, reserve_native)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_reserves_have_no_price() {
        assert_eq!(
            PriceView::from_reserves(Amount::ZERO, Amount::new(5)),
            Err(AmmError::InsufficientLiquidity)
        );
        assert_eq!(
            PriceView::from_reserves(Amount::new(5), Amount::ZERO),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn prices_are_reciprocal() {
        let Ok(p) = PriceView::from_reserves(Amount::new(11), Amount::new(91)) else {
            panic!("expected Ok");
        };
        assert!((p.asset_in_native.get() * p.native_in_asset.get() - 1.0).abs() < 1e-12);
    }
}
