//! # Ticket Ledger
//!
//! In-memory ledger for ticketed events.
//!
//! Owners register events with a fixed ticket pool; every ticket is minted up
//! front and held by the owner. Buyers purchase unused tickets, which are
//! reassigned and marked used, and anyone can check that a ticket belongs to an
//! event. Owners may update, end or delete their events.
//!
//! ## Layers
//!
//! - [`LedgerReducer`]: validates commands ([`LedgerAction`]) and applies the
//!   resulting events to [`LedgerState`]
//! - [`LedgerState`]: the two ordered stores and the read-only queries
//! - [`LedgerHandle`]: shared async access; each command runs under one lock
//! - [`api`]: JSON request/reply types and [`api::dispatch`]
//! - [`LedgerServer`]: the newline-delimited JSON loop with snapshot saves
//! - [`LedgerSnapshot`]: persistence of both stores to a JSON file
//!
//! ## Example
//!
//! ```
//! use ticket_ledger::{LedgerAction, LedgerReducer, LedgerState};
//! use ticket_ledger_core::{EventPayload, LedgerEnvironment, Reducer};
//!
//! let reducer = LedgerReducer::default();
//! let env = LedgerEnvironment::production();
//! let mut state = LedgerState::new();
//!
//! let payload = EventPayload {
//!     event_name: "Gig".to_string(),
//!     asset_description: "desc".to_string(),
//!     owner_id: "11111111-1111-1111-1111-111111111111".to_string(),
//!     status: "active".to_string(),
//!     max_nfts: "2".to_string(),
//!     ..EventPayload::default()
//! };
//! let events = reducer.reduce(&mut state, LedgerAction::CreateEvent { payload }, &env)?;
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(state.get_all_nfts()?.len(), 2);
//! # Ok::<(), ticket_ledger_core::LedgerError>(())
//! ```

pub mod api;
pub mod config;
pub mod handle;
pub mod metrics;
pub mod reducer;
pub mod server;
pub mod snapshot;
pub mod state;
pub mod store;

pub use api::{LedgerReply, LedgerRequest, ReplyPayload, dispatch, encode_reply, parse_request};
pub use config::{Config, LedgerConfig};
pub use handle::LedgerHandle;
pub use reducer::{LedgerAction, LedgerReducer};
pub use server::LedgerServer;
pub use snapshot::{LedgerSnapshot, SnapshotError};
pub use state::LedgerState;
pub use store::{EventStore, InMemoryStore, TicketStore};
