//! Metrics for ledger operations.
//!
//! Recording is a no-op until a recorder is installed; the binary installs the
//! Prometheus exporter when `LEDGER_METRICS_ADDR` is set.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;
use ticket_ledger_core::Result;

/// Requests handled, labelled by `operation` and `outcome`.
pub const OPERATIONS_TOTAL: &str = "ledger_operations_total";
/// Tickets minted at event creation.
pub const TICKETS_MINTED_TOTAL: &str = "ledger_tickets_minted_total";
/// Tickets sold.
pub const TICKETS_SOLD_TOTAL: &str = "ledger_tickets_sold_total";
/// Time spent inside the ledger lock, labelled by `operation`.
pub const OPERATION_DURATION_SECONDS: &str = "ledger_operation_duration_seconds";
/// Events currently stored.
pub const EVENTS: &str = "ledger_events";

/// Outcome label for successful operations.
pub const OUTCOME_OK: &str = "ok";

/// Register metric descriptions with the installed recorder.
pub fn register_metrics() {
    describe_counter!(
        OPERATIONS_TOTAL,
        "Ledger operations handled, by operation and outcome"
    );
    describe_histogram!(
        OPERATION_DURATION_SECONDS,
        "Time spent applying a ledger operation"
    );
    describe_counter!(TICKETS_MINTED_TOTAL, "Tickets minted at event creation");
    describe_counter!(TICKETS_SOLD_TOTAL, "Tickets sold to buyers");
    describe_gauge!(EVENTS, "Events currently stored");
}

/// Count one operation; the outcome is `ok` or the error code.
pub fn record_operation<T>(operation: &'static str, result: &Result<T>) {
    let outcome = match result {
        Ok(_) => OUTCOME_OK,
        Err(err) => err.code(),
    };
    counter!(OPERATIONS_TOTAL, "operation" => operation, "outcome" => outcome).increment(1);
}

/// Record how long an operation held the ledger.
pub fn record_duration(operation: &'static str, elapsed: Duration) {
    histogram!(OPERATION_DURATION_SECONDS, "operation" => operation).record(elapsed.as_secs_f64());
}

/// Count minted tickets.
pub fn record_minted(count: u64) {
    counter!(TICKETS_MINTED_TOTAL).increment(count);
}

/// Count sold tickets.
pub fn record_sold(count: u64) {
    counter!(TICKETS_SOLD_TOTAL).increment(count);
}

/// Publish the current number of stored events.
#[allow(clippy::cast_precision_loss)] // event counts stay far below 2^52
pub fn set_event_count(count: usize) {
    gauge!(EVENTS).set(count as f64);
}
