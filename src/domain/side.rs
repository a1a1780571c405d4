//! Pool sides and swap direction.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the two reserves a pool holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The chain's native unit.
    Native,
    /// The pooled fungible asset.
    Asset,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Native => Self::Asset,
            Self::Asset => Self::Native,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Asset => write!(f, "asset"),
        }
    }
}

/// Which way a swap trades through the pool.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::{Side, SwapDirection};
///
/// let d = SwapDirection::NativeToAsset;
/// assert_eq!(d.input(), Side::Native);
/// assert_eq!(d.output(), Side::Asset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Pay native, receive asset.
    NativeToAsset,
    /// Pay asset, receive native.
    AssetToNative,
}

impl SwapDirection {
    /// The side the trader pays into.
    #[must_use]
    pub const fn input(&self) -> Side {
        match self {
            Self::NativeToAsset => Side::Native,
            Self::AssetToNative => Side::Asset,
        }
    }

    /// The side the trader is paid from.
    #[must_use]
    pub const fn output(&self) -> Side {
        self.input().other()
    }

    /// The reverse trade.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::NativeToAsset => Self::AssetToNative,
            Self::AssetToNative => Self::NativeToAsset,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.input(), self.output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_are_opposite() {
        for d in [SwapDirection::NativeToAsset, SwapDirection::AssetToNative] {
            assert_ne!(d.input(), d.output());
            assert_eq!(d.reversed().input(), d.output());
        }
    }

    #[test]
    fn display() {
        assert_eq!(SwapDirection::AssetToNative.to_string(), "asset->native");
    }
}
