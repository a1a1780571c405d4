//! Receipts for liquidity deposits and withdrawals.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Shares};

/// What a deposit actually drew from the provider and minted for them.
///
/// Under [`DepositPolicy::Trim`](crate::config::DepositPolicy::Trim) one of
/// the two amounts may be smaller than what the provider offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deposit {
    /// Native units drawn into the pool.
    pub native_amount: Amount,
    /// Asset units drawn into the pool.
    pub asset_amount: Amount,
    /// Shares credited to the provider.
    pub shares_minted: Shares,
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deposit(native={}, asset={}, shares={})",
            self.native_amount, self.asset_amount, self.shares_minted
        )
    }
}

/// What a withdrawal paid out and burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Native units paid to the provider.
    pub native_amount: Amount,
    /// Asset units paid to the provider.
    pub asset_amount: Amount,
    /// Shares burned from the provider.
    pub shares_burned: Shares,
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Withdrawal(native={}, asset={}, shares={})",
            self.native_amount, self.asset_amount, self.shares_burned
        )
    }
}

/// Name and symbol of a pool's share token, fixed at pool creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShareToken {
    name: String,
    symbol: String,
}

impl ShareToken {
    /// Creates share-token metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_token_accessors() {
        let t = ShareToken::new("Token1", "TK1");
        assert_eq!(t.name(), "Token1");
        assert_eq!(t.symbol(), "TK1");
        assert_eq!(t.to_string(), "Token1 (TK1)");
    }

    #[test]
    fn receipts_display() {
        let w = Withdrawal {
            native_amount: Amount::new(1),
            asset_amount: Amount::new(2),
            shares_burned: Shares::new(3),
        };
        assert_eq!(w.to_string(), "Withdrawal(native=1, asset=2, shares=3)");
    }
}
