//! Payment schemes understood by q402 facilitators.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The closed set of q402 payment schemes.
///
/// A facilitator rejects any payload whose scheme it does not recognize, so
/// this enum is deliberately not `#[non_exhaustive]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentScheme {
    /// EIP-7702 delegated payment: an EIP-712 witness plus a delegation
    /// authorization, both signed by the payer.
    Eip7702Delegated,
}

impl PaymentScheme {
    /// Wire value of [`PaymentScheme::Eip7702Delegated`].
    pub const EIP7702_DELEGATED: &'static str = "evm/eip7702-delegated-payment";

    /// Returns the wire value of this scheme.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eip7702Delegated => Self::EIP7702_DELEGATED,
        }
    }
}

impl Display for PaymentScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PaymentScheme {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for PaymentScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::EIP7702_DELEGATED => Ok(Self::Eip7702Delegated),
            other => Err(format!("unknown payment scheme '{other}'")),
        }
    }
}

impl Serialize for PaymentScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
