//! Chain identifiers as carried in wallet JSON-RPC requests.
//!
//! A chain id travels as a lowercase, `0x`-prefixed hex string with no
//! leading zeros. Its numeric value must be non-zero and no greater than
//! [`MAX_SAFE_CHAIN_ID`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The largest chain id the wallet can handle.
///
/// Chain ids end up in signature `v` values (`chain_id * 2 + 35`), which must
/// stay within the 53-bit safe integer range of the wallet's clients.
pub const MAX_SAFE_CHAIN_ID: u64 = 4_503_599_627_370_476;

/// Errors from parsing a chain id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainIdError {
    /// Not a `0x`-prefixed, unpadded, non-zero lowercase hex string
    #[error("expected 0x-prefixed, unpadded, non-zero hexadecimal string, got {0:?}")]
    Malformed(String),

    /// Well-formed, but numerically larger than the allowed ceiling
    #[error("chain id {chain_id} is greater than max safe value {max}")]
    Unsafe { chain_id: String, max: u64 },
}

/// Validated chain identifier.
///
/// Only constructible through [`ChainId::parse`] (or the checked
/// conversions built on it), so every instance is well-formed and safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainId {
    hex: String,
}

impl ChainId {
    /// Parse a chain id, lowercasing it first, against a custom ceiling.
    pub fn parse_with_max(raw: &str, max_safe: u64) -> Result<Self, ChainIdError> {
        let hex = raw.to_lowercase();
        if !is_prefixed_formatted_hex(&hex) {
            return Err(ChainIdError::Malformed(raw.to_string()));
        }

        // Format is already checked, so the only possible failure is overflow.
        let value = u64::from_str_radix(&hex[2..], 16).unwrap_or(u64::MAX);
        if value > max_safe {
            return Err(ChainIdError::Unsafe {
                chain_id: hex,
                max: max_safe,
            });
        }

        Ok(Self { hex })
    }

    /// Parse a chain id against [`MAX_SAFE_CHAIN_ID`].
    pub fn parse(raw: &str) -> Result<Self, ChainIdError> {
        Self::parse_with_max(raw, MAX_SAFE_CHAIN_ID)
    }

    /// Build a chain id from its numeric value.
    pub fn from_u64(value: u64) -> Result<Self, ChainIdError> {
        Self::parse(&format!("0x{:x}", value))
    }

    /// Hex string form, e.g. `0x1`
    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

/// Check for a lowercase `0x`-prefixed hex string without leading zeros.
///
/// Equivalent to `^0x[1-9a-f]+[0-9a-f]*$`.
pub fn is_prefixed_formatted_hex(value: &str) -> bool {
    let Some(digits) = value.strip_prefix("0x") else {
        return false;
    };

    let mut chars = digits.chars();
    match chars.next() {
        Some(first) if matches!(first, '1'..='9' | 'a'..='f') => {}
        _ => return false,
    }

    chars.all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ChainId {
    type Error = ChainIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ChainId> for String {
    fn from(id: ChainId) -> Self {
        id.hex
    }
}

impl AsRef<str> for ChainId {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_lowercases() {
        let id = ChainId::parse("0xAB").unwrap();
        assert_eq!(id.as_str(), "0xab");
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["", "0x", "0x0", "0x01", "1", "0xg1", "x1", "0x 1", "0x1.5"] {
            assert!(
                matches!(ChainId::parse(raw), Err(ChainIdError::Malformed(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_uppercase_prefix_lowercased_before_check() {
        let id = ChainId::parse("0X1").unwrap();
        assert_eq!(id, ChainId::parse("0x1").unwrap());
    }

    #[test]
    fn test_rejects_unsafe() {
        let err = ChainId::parse("0x20000000000000").unwrap_err();
        assert!(matches!(err, ChainIdError::Unsafe { .. }));

        // Overflowing u64 entirely
        let err = ChainId::parse("0xffffffffffffffffffff").unwrap_err();
        assert!(matches!(err, ChainIdError::Unsafe { .. }));
    }

    #[test]
    fn test_max_safe_boundary() {
        let max = ChainId::from_u64(MAX_SAFE_CHAIN_ID).unwrap();
        assert_eq!(max.as_str(), "0xfffffffffffec");
        assert!(ChainId::from_u64(MAX_SAFE_CHAIN_ID + 1).is_err());
        assert!(ChainId::from_u64(0).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let id: ChainId = serde_json::from_str("\"0x2a\"").unwrap();
        assert_eq!(id, ChainId::from_u64(42).unwrap());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0x2a\"");
        assert!(serde_json::from_str::<ChainId>("\"0x02a\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_valid_values_accepted(value in 1u64..=MAX_SAFE_CHAIN_ID) {
            let id = ChainId::from_u64(value).unwrap();
            let parsed = u64::from_str_radix(&id.as_str()[2..], 16).unwrap();
            prop_assert_eq!(parsed, value);
            prop_assert!(is_prefixed_formatted_hex(id.as_str()));
        }

        #[test]
        fn prop_zero_padded_rejected(value in 1u64..=MAX_SAFE_CHAIN_ID, zeros in 1usize..4) {
            let padded = format!("0x{}{:x}", "0".repeat(zeros), value);
            prop_assert!(ChainId::parse(&padded).is_err());
        }

        #[test]
        fn prop_missing_prefix_rejected(value in 1u64..=MAX_SAFE_CHAIN_ID) {
            let unprefixed = format!("{:x}", value);
            prop_assert!(ChainId::parse(&unprefixed).is_err());
        }
    }
}
