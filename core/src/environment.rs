//! Environment traits injected into the ledger.
//!
//! All nondeterminism (current time, fresh identifiers) is abstracted behind
//! traits so tests can substitute fixed implementations.

use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use ticket_ledger_core::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let earlier = clock.now();
/// assert!(clock.now() >= earlier);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of fresh record identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce an identifier that has not been handed out before.
    fn next_id(&self) -> Uuid;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Environment dependencies for the ledger service
#[derive(Clone)]
pub struct LedgerEnvironment {
    /// Clock for "now" comparisons and end timestamps
    pub clock: Arc<dyn Clock>,
    /// Generator for event and ticket identifiers
    pub ids: Arc<dyn IdGenerator>,
}

impl LedgerEnvironment {
    /// Creates a new `LedgerEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and random v4 identifiers.
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Current time as nanoseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Operation`] if the clock reads outside the
    /// representable range (before 1970 or after 2262).
    pub fn now_nanos(&self) -> Result<u64> {
        epoch_nanos(self.clock.now())
    }
}

impl fmt::Debug for LedgerEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerEnvironment")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}

/// Converts a timestamp to nanoseconds since the Unix epoch.
///
/// # Errors
///
/// Returns [`LedgerError::Operation`] for times before the epoch or beyond
/// what fits in an `i64` nanosecond count.
pub fn epoch_nanos(time: DateTime<Utc>) -> Result<u64> {
    time.timestamp_nanos_opt()
        .and_then(|nanos| u64::try_from(nanos).ok())
        .ok_or_else(|| LedgerError::operation(format!("Clock reading {time} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_nanos_of_epoch_is_zero() {
        assert_eq!(epoch_nanos(DateTime::UNIX_EPOCH), Ok(0));
    }

    #[test]
    fn epoch_nanos_rejects_pre_epoch_times() {
        let before = DateTime::from_timestamp(-1, 0).unwrap_or_default();
        assert!(epoch_nanos(before).is_err_and(|err| err.is_internal()));
    }

    #[test]
    fn uuid_generator_produces_distinct_ids() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }

    #[test]
    fn production_environment_reads_the_system_clock() {
        let env = LedgerEnvironment::production();
        assert!(env.now_nanos().is_ok_and(|nanos| nanos > 0));
    }
}
