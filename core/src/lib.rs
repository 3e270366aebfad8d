//! # Ticket Ledger Core
//!
//! Domain types and traits shared by the ticket ledger crates.
//!
//! The ledger tracks two kinds of records:
//!
//! - **Event**: an owner-created campaign with a fixed ticket pool and a lifecycle status
//! - **NFT**: one ticket of an event's pool, individually identified and owned
//!
//! This crate holds the record types, the error taxonomy every ledger operation
//! reports through, identifier validation, the decimal-string wire encoding used for
//! counts and timestamps, the environment traits (`Clock`, `IdGenerator`), and the
//! [`Reducer`] trait the ledger's business logic implements.
//!
//! ## Example
//!
//! ```
//! use ticket_ledger_core::{Event, EventId, EventPayload, EventStatus};
//!
//! let payload = EventPayload {
//!     event_name: "Gig".to_string(),
//!     asset_description: "desc".to_string(),
//!     owner_id: "11111111-1111-1111-1111-111111111111".to_string(),
//!     status: "active".to_string(),
//!     max_nfts: "3".to_string(),
//!     ..EventPayload::default()
//! };
//!
//! let event = Event::from_payload(EventId::new(), payload)?;
//! assert_eq!(event.status, EventStatus::Active);
//! assert_eq!(event.max_nfts, 3);
//! # Ok::<(), ticket_ledger_core::LedgerError>(())
//! ```

pub mod encoding;
pub mod environment;
pub mod error;
pub mod reducer;
pub mod types;
pub mod validation;

pub use environment::{Clock, IdGenerator, LedgerEnvironment, SystemClock, UuidGenerator};
pub use error::{LedgerError, Result};
pub use reducer::Reducer;
pub use types::{Event, EventId, EventPayload, EventStatus, Nft, NftId};
pub use validation::is_valid_uuid;
