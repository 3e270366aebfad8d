//! Mock implementations of the environment traits.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use ticket_ledger_core::{Clock, IdGenerator, LedgerEnvironment};
use uuid::Uuid;

/// Fixed clock for deterministic tests
///
/// Always returns the same time, making tests reproducible.
///
/// # Example
///
/// ```
/// use ticket_ledger_testing::mocks::FixedClock;
/// use ticket_ledger_core::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// let time1 = clock.now();
/// let time2 = clock.now();
/// assert_eq!(time1, time2); // Always the same!
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
#[must_use]
pub fn test_clock() -> FixedClock {
    FixedClock::new(default_test_time())
}

fn default_test_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Clock that only moves when told to.
///
/// Useful for exercising time-dependent transitions (ending an event twice,
/// end dates in the past or future) without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    nanos: AtomicI64,
}

impl ManualClock {
    /// Start the clock at `time`
    #[must_use]
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            nanos: AtomicI64::new(time.timestamp_nanos_opt().unwrap_or_default()),
        }
    }

    /// Start the clock at 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn starting_at_test_time() -> Self {
        Self::new(default_test_time())
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let step = by.num_nanoseconds().unwrap_or(i64::MAX);
        self.nanos.fetch_add(step, Ordering::SeqCst);
    }

    /// Jump the clock to `time`
    pub fn set(&self, time: DateTime<Utc>) {
        self.nanos
            .store(time.timestamp_nanos_opt().unwrap_or_default(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

/// Predictable identifiers: `00000000-0000-0000-0000-000000000001`, `...002`, ...
///
/// Ledger enumeration is ordered by id, so sequential ids make mint order and
/// purchase order line up in tests.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start at 1
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start at `first`
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::SeqCst)))
    }
}

/// Environment with [`test_clock`] and a fresh [`SequentialIdGenerator`]
#[must_use]
pub fn test_environment() -> LedgerEnvironment {
    LedgerEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new()))
}
