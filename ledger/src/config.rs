//! Configuration management for the ticket ledger.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "ticket_ledger=info";

/// Default per-event mint limit.
pub const DEFAULT_MAX_MINT_PER_EVENT: u64 = 100_000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Ledger business limits
    pub ledger: LedgerConfig,
    /// Snapshot persistence
    pub snapshot: SnapshotConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

/// Business limits enforced by the ledger service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Largest ticket pool a single `createEvent` may mint
    pub max_mint_per_event: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_mint_per_event: DEFAULT_MAX_MINT_PER_EVENT,
        }
    }
}

/// Snapshot persistence configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot file; `None` keeps the ledger purely in memory
    pub path: Option<PathBuf>,
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing filter directive (`RUST_LOG` syntax)
    pub log_filter: String,
    /// Prometheus listener address; `None` disables the exporter
    pub metrics_addr: Option<SocketAddr>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            metrics_addr: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            ledger: LedgerConfig {
                max_mint_per_event: non_empty("LEDGER_MAX_MINT_PER_EVENT")
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(DEFAULT_MAX_MINT_PER_EVENT),
            },
            snapshot: SnapshotConfig {
                path: non_empty("LEDGER_SNAPSHOT_PATH").map(PathBuf::from),
            },
            observability: ObservabilityConfig {
                log_filter: non_empty("RUST_LOG")
                    .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
                metrics_addr: non_empty("LEDGER_METRICS_ADDR")
                    .and_then(|s| s.trim().parse().ok()),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_source(|_| None)
    }
}
