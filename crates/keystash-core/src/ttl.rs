//! Time-to-live values.
//!
//! A TTL is either a plain count of seconds or a string of the form
//! `<digits><unit>` where the unit is `m` (minutes), `h` (hours) or `d`
//! (days). A bare digit string is read as seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * 60;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Largest accepted TTL. Redis rejects an expiry whose deadline in
/// milliseconds overflows `i64`, and the deadline includes the current time.
pub const MAX_TTL_SECONDS: u64 = i64::MAX as u64 / 1000 / 2;

/// A caller-supplied expiry for a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TtlSpec {
    /// A number of seconds.
    Seconds(u64),
    /// A unit-suffixed duration such as `"30m"`, `"8h"` or `"7d"`.
    Text(String),
}

impl TtlSpec {
    /// Resolve to a number of seconds, rejecting values above
    /// [`MAX_TTL_SECONDS`].
    pub fn to_seconds(&self) -> AppResult<u64> {
        match self {
            Self::Seconds(seconds) if *seconds > MAX_TTL_SECONDS => Err(
                AppError::invalid_argument(format!(
                    "ttl of {seconds}s exceeds the maximum of {MAX_TTL_SECONDS}s"
                )),
            ),
            Self::Seconds(seconds) => Ok(*seconds),
            Self::Text(text) => parse_ttl(text),
        }
    }
}

impl fmt::Display for TtlSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(seconds) => write!(f, "{seconds}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for TtlSpec {
    fn from(seconds: u64) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<u32> for TtlSpec {
    fn from(seconds: u32) -> Self {
        Self::Seconds(u64::from(seconds))
    }
}

impl From<&str> for TtlSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TtlSpec {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<std::time::Duration> for TtlSpec {
    fn from(duration: std::time::Duration) -> Self {
        Self::Seconds(duration.as_secs())
    }
}

/// Parse a TTL string into seconds.
///
/// Accepts `^(\d+)([mhd])$` or a bare `^\d+$`. Anything else, including
/// combined units, fractions and an `s` suffix, is an invalid argument.
/// So is a duration above [`MAX_TTL_SECONDS`].
pub fn parse_ttl(text: &str) -> AppResult<u64> {
    let invalid = || {
        AppError::invalid_argument(format!(
            "Invalid ttl format '{text}': provide seconds or a number with a time unit \
             (m, h, d), for example: \"30m\", \"8h\", \"7d\""
        ))
    };

    let (digits, multiplier) = match text.char_indices().last() {
        Some((idx, 'm')) => (&text[..idx], SECONDS_PER_MINUTE),
        Some((idx, 'h')) => (&text[..idx], SECONDS_PER_HOUR),
        Some((idx, 'd')) => (&text[..idx], SECONDS_PER_DAY),
        Some(_) => (text, 1),
        None => return Err(invalid()),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let count: u64 = digits.parse().map_err(|_| invalid())?;
    count
        .checked_mul(multiplier)
        .filter(|seconds| *seconds <= MAX_TTL_SECONDS)
        .ok_or_else(invalid)
}
