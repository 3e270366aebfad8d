//! # Ticket Ledger Testing
//!
//! Testing utilities and helpers for the ticket ledger.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - Payload fixtures and a builder for event payloads
//! - Property-based testing strategies
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use ticket_ledger::{LedgerAction, LedgerReducer, LedgerState};
//! use ticket_ledger_testing::{ReducerTest, fixtures, test_environment};
//!
//! ReducerTest::new(LedgerReducer::default())
//!     .with_env(test_environment())
//!     .given_state(LedgerState::new())
//!     .when_action(LedgerAction::CreateEvent { payload: fixtures::gig_payload() })
//!     .then_state(|state| assert_eq!(state.ticket_count(), 3))
//!     .run();
//! ```

pub mod fixtures;
pub mod mocks;
pub mod properties;
pub mod reducer_test;

// Re-export commonly used items
pub use fixtures::{BUYER_ID, OWNER_ID, PayloadBuilder, STRANGER_ID};
pub use reducer_test::ReducerTest;
pub use mocks::{FixedClock, ManualClock, SequentialIdGenerator, test_clock, test_environment};
