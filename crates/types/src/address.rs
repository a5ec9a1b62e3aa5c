use crate::errors::{codes, ErrorCode, ROOT_CODESPACE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a ledger address string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("address must start with 'ldg'")]
    InvalidPrefix,
    #[error("address must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("address payload is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("address payload must be exactly 32 bytes")]
    InvalidPayloadLength,
}

impl ErrorCode for AddressError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        codes::INVALID_ADDRESS
    }
}

/// Number of raw bytes contained in an address.
pub const ADDRESS_BYTES: usize = 32;
/// Human readable prefix of every encoded address.
pub const ADDRESS_PREFIX: &str = "ldg";
/// Expected string length of an encoded address (prefix + 64 hex chars).
pub const ADDRESS_STRING_LENGTH: usize = ADDRESS_PREFIX.len() + ADDRESS_BYTES * 2;

/// Encode a 32-byte account identifier into the human readable format.
pub fn encode_address(bytes: &[u8; ADDRESS_BYTES]) -> String {
    let mut encoded = String::with_capacity(ADDRESS_STRING_LENGTH);
    encoded.push_str(ADDRESS_PREFIX);
    encoded.push_str(&hex::encode(bytes));
    encoded
}

/// Attempt to decode a human readable address string into the raw bytes.
pub fn decode_address(address: &str) -> Result<[u8; ADDRESS_BYTES], AddressError> {
    if !address.starts_with(ADDRESS_PREFIX) {
        return Err(AddressError::InvalidPrefix);
    }

    if address.len() != ADDRESS_STRING_LENGTH {
        return Err(AddressError::InvalidLength {
            expected: ADDRESS_STRING_LENGTH,
            actual: address.len(),
        });
    }

    let decoded = hex::decode(&address[ADDRESS_PREFIX.len()..])?;
    decoded
        .try_into()
        .map_err(|_| AddressError::InvalidPayloadLength)
}

/// Check whether the provided string is a valid address.
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

/// Opaque account identifier. Serialised as its string encoding in JSON.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Address(bytes)
    }

    /// Deterministic address of the module account called `name`.
    pub fn for_module(name: &str) -> Self {
        Address(*blake3::hash(name.as_bytes()).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(value: [u8; ADDRESS_BYTES]) -> Self {
        Address(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        encode_address(&value.0)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode_address(&value).map(Address)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_address(s).map(Address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_address(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let bytes = [0xABu8; ADDRESS_BYTES];
        let encoded = encode_address(&bytes);
        assert!(encoded.starts_with(ADDRESS_PREFIX));
        assert_eq!(encoded.len(), ADDRESS_STRING_LENGTH);
        assert_eq!(decode_address(&encoded).unwrap(), bytes);
    }

    #[test]
    fn invalid_prefix_rejected() {
        let bad = "x".repeat(ADDRESS_PREFIX.len()) + &"00".repeat(ADDRESS_BYTES);
        assert_eq!(decode_address(&bad), Err(AddressError::InvalidPrefix));
    }

    #[test]
    fn invalid_length_rejected() {
        let bad = ADDRESS_PREFIX.to_string() + &"00".repeat(ADDRESS_BYTES - 1);
        assert!(matches!(
            decode_address(&bad),
            Err(AddressError::InvalidLength { .. })
        ));
    }

    #[test]
    fn invalid_hex_rejected() {
        let bad = format!("{ADDRESS_PREFIX}{}", "gg".repeat(ADDRESS_BYTES));
        assert!(matches!(
            decode_address(&bad),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn module_addresses_are_deterministic_and_distinct() {
        assert_eq!(Address::for_module("token"), Address::for_module("token"));
        assert_ne!(
            Address::for_module("token"),
            Address::for_module("distribution")
        );
    }

    #[test]
    fn json_uses_string_form() {
        let addr = Address::for_module("token");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
