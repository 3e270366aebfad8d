//! Decimal-string wire encoding for counts and timestamps.
//!
//! Counts (`maxNFTs`) and epoch timestamps (`startDate`, `endDate`) are `u64`
//! internally but travel as decimal strings so existing callers keep working.
//! Deserialization also accepts plain JSON integers.

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Decodes a decimal string, treating the empty string as 0.
///
/// Returns `None` for anything that is not an unsigned decimal integer.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse().ok()
}

/// `#[serde(with = "ticket_ledger_core::encoding::decimal")]` adapter for `u64` fields.
pub mod decimal {
    use super::{DecimalVisitor, Deserializer, Serializer};

    /// Serialize a `u64` as a decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)] // serde's `with` signature
    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    /// Deserialize a `u64` from a decimal string or an integer.
    ///
    /// # Errors
    ///
    /// Fails on negative numbers and non-numeric strings.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an unsigned integer or a decimal string")
    }

    fn visit_u64<E>(self, value: u64) -> Result<u64, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_i64<E>(self, value: i64) -> Result<u64, E>
    where
        E: de::Error,
    {
        u64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_str<E>(self, value: &str) -> Result<u64, E>
    where
        E: de::Error,
    {
        parse_decimal(value).ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
    }
}
