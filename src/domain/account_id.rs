//! 32-byte identifiers for accounts and assets.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Writes `bytes` as lowercase hex, prefixed with `0x`.
fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8; 32]) -> fmt::Result {
    f.write_str("0x")?;
    for b in bytes {
        write!(f, "{b:02x}")?;
    }
    Ok(())
}

/// A chain-agnostic account address: a liquidity provider, a trader, or a
/// pool itself.
///
/// All 32-byte sequences are valid, so construction is infallible.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::AccountId;
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// assert_eq!(alice.as_bytes(), [1u8; 32]);
/// assert!(alice.to_string().starts_with("0x0101"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

/// Identifier of the non-native fungible asset a pool trades against the
/// native unit.  The registry holds at most one pool per `AssetId`.
///
/// # Examples
///
/// ```
/// use qite_dex::domain::AssetId;
///
/// let tk1 = AssetId::from_bytes([7u8; 32]);
/// assert_eq!(tk1, AssetId::from_bytes([7u8; 32]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_round_trip_bytes() {
        let bytes = [42u8; 32];
        assert_eq!(AccountId::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn zero_detection() {
        assert!(AccountId::from_bytes([0u8; 32]).is_zero());
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        assert!(!AccountId::from_bytes(bytes).is_zero());
    }

    #[test]
    fn hex_display() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        let shown = AssetId::from_bytes(bytes).to_string();
        assert_eq!(shown.len(), 66);
        assert!(shown.starts_with("0xab00"));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(AccountId::from_bytes([0u8; 32]) < AccountId::from_bytes([1u8; 32]));
    }
}
