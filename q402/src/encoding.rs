//! Lossless encodings for the q402 wire format.
//!
//! Integers that may exceed 2^53 (`amount`, `deadline` and the witness
//! `nonce`) travel as base-10 strings so that receivers decoding JSON numbers
//! into doubles never lose precision. [`DecimalU256`] is the single place
//! where those conversions happen, in both directions.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors from parsing an unsigned decimal integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    /// The input string was empty.
    #[error("empty decimal string")]
    Empty,
    /// The input contained something other than ASCII digits.
    #[error("invalid decimal integer {0:?}")]
    InvalidDigit(String),
    /// The value is larger than `2^256 - 1`.
    #[error("decimal integer {0} does not fit in 256 bits")]
    Overflow(String),
}

/// Parses a base-10 string of ASCII digits into a [`U256`].
///
/// Signs, whitespace, hex prefixes, separators and exponents are all
/// rejected. Leading zeros are accepted.
///
/// # Errors
///
/// Returns [`DecimalError`] if the string is empty, contains a non-digit or
/// overflows 256 bits.
pub fn parse_decimal_u256(s: &str) -> Result<U256, DecimalError> {
    if s.is_empty() {
        return Err(DecimalError::Empty);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::InvalidDigit(s.to_owned()));
    }
    // Only overflow can fail once every byte is a digit.
    U256::from_str_radix(s, 10).map_err(|_| DecimalError::Overflow(s.to_owned()))
}

/// A [`U256`] that serializes as a decimal string.
///
/// ```json
/// "1000000000000000000"
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecimalU256(U256);

impl DecimalU256 {
    /// Wraps a [`U256`].
    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Returns the inner [`U256`] value.
    #[must_use]
    pub const fn inner(&self) -> U256 {
        self.0
    }
}

impl FromStr for DecimalU256 {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal_u256(s).map(Self)
    }
}

impl Display for DecimalU256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<U256> for DecimalU256 {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for DecimalU256 {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl Serialize for DecimalU256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for DecimalU256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Serializes an address as an EIP-55 checksummed hex string.
///
/// For `#[serde(serialize_with = "...")]` on output address fields.
///
/// # Errors
///
/// Returns the serializer's error.
pub fn serialize_checksummed<S: Serializer>(
    address: &Address,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

/// Renders a value as base64-encoded JSON, the form payment payloads take in
/// HTTP headers.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized to JSON.
pub fn encode_base64_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    Ok(b64.encode(json))
}

/// Errors from decoding a base64-encoded JSON value.
#[derive(Debug, thiserror::Error)]
pub enum Base64JsonError {
    /// The input was not valid base64.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes were not the expected JSON document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Decodes a value produced by [`encode_base64_json`].
///
/// # Errors
///
/// Returns [`Base64JsonError`] if the input is not base64 or the decoded
/// bytes do not deserialize into `T`.
pub fn decode_base64_json<T: DeserializeOwned>(input: &str) -> Result<T, Base64JsonError> {
    let bytes = b64.decode(input.trim())?;
    Ok(serde_json::from_slice(&bytes)?)
}
