//! Unix timestamps for witness deadlines.
//!
//! A witness is redeemable until its `deadline`, expressed in seconds since
//! the Unix epoch. The deadline is part of the signed EIP-712 message as a
//! `uint256`.

use std::ops::Add;
use std::time::SystemTime;

use alloy_primitives::U256;

/// A Unix timestamp in seconds since 1970-01-01T00:00:00Z.
///
/// Only used to compute deadlines. On the wire a deadline is a
/// [`DecimalU256`](crate::encoding::DecimalU256).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct UnixTimestamp(u64);

impl Add<u64> for UnixTimestamp {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

impl UnixTimestamp {
    /// Creates a new [`UnixTimestamp`] from a raw seconds value.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the current system time as a [`UnixTimestamp`].
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set to a time before the Unix epoch.
    #[must_use]
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .expect("SystemTime before UNIX epoch?!?")
            .as_secs();
        Self(now)
    }

    /// Returns the timestamp as raw seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns the timestamp as the `uint256` it is signed as.
    #[must_use]
    pub fn to_u256(self) -> U256 {
        U256::from(self.0)
    }
}
