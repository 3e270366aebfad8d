//! Input validation for identifiers and numeric fields.

use crate::encoding::parse_decimal;
use crate::error::{LedgerError, Result};
use uuid::Uuid;

/// Length of a hyphenated UUID string.
const UUID_LEN: usize = 36;

/// Checks whether `id` is a hyphenated hex UUID (`8-4-4-4-12`).
///
/// Matching is case-insensitive. Other textual forms accepted by
/// [`Uuid::parse_str`] (braced, URN, simple) are rejected.
///
/// # Example
///
/// ```
/// use ticket_ledger_core::is_valid_uuid;
///
/// assert!(is_valid_uuid("123e4567-e89b-12d3-a456-426614174000"));
/// assert!(!is_valid_uuid("123e4567e89b12d3a456426614174000"));
/// assert!(!is_valid_uuid("not-a-uuid"));
/// ```
#[must_use]
pub fn is_valid_uuid(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == UUID_LEN
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            8 | 13 | 18 | 23 => *byte == b'-',
            _ => byte.is_ascii_hexdigit(),
        })
}

/// Parses `id` as a record key.
///
/// Stored keys are compared as text, so only the canonical lowercase hyphenated
/// spelling names a record. Uppercase forms pass [`is_valid_uuid`] but yield `None` here.
#[must_use]
pub fn parse_key(id: &str) -> Option<Uuid> {
    if !is_valid_uuid(id) {
        return None;
    }
    Uuid::parse_str(id)
        .ok()
        .filter(|uuid| uuid.to_string() == id)
}

/// Decodes a decimal-string count or timestamp field.
///
/// An empty string decodes to 0.
///
/// # Errors
///
/// Returns [`LedgerError::Validation`] when `raw` is not an unsigned decimal integer.
pub fn parse_count(field: &str, raw: &str) -> Result<u64> {
    parse_decimal(raw).ok_or_else(|| LedgerError::validation(format!("Invalid {field}: {raw}")))
}
