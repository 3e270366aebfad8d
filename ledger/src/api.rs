//! JSON request/response boundary.
//!
//! A request names one of the twelve ledger operations in `method` and carries
//! its arguments in `params`:
//!
//! ```json
//! {"method":"buyNFTsForEvent","params":{"eventId":"…","ownerId":"…","quantity":2}}
//! ```
//!
//! Every request gets exactly one reply, `{"Ok": …}` or `{"Err": "<message>"}`.

use crate::handle::LedgerHandle;
use serde::{Deserialize, Serialize};
use ticket_ledger_core::encoding::decimal;
use ticket_ledger_core::{Event, EventPayload, LedgerError, Nft};

/// One ledger operation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "method",
    content = "params",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum LedgerRequest {
    /// Register an event and mint its tickets
    CreateEvent {
        /// Event fields as sent by the caller
        payload: EventPayload,
    },
    /// List every event
    GetAllEvents,
    /// Look up one event
    GetEventById {
        /// Event id
        id: String,
    },
    /// List events by owner
    GetOwnersEvents {
        /// Owner principal
        owner_id: String,
    },
    /// List events by status
    GetEventsByStatus {
        /// `active` or `inactive`
        status: String,
    },
    /// Merge fields into an owned event
    UpdateEvent {
        /// Event id
        event_id: String,
        /// Caller principal
        owner_id: String,
        /// Replacement fields; empty ones keep the stored value
        payload: EventPayload,
    },
    /// Terminate an owned event
    EndEvent {
        /// Event id
        event_id: String,
        /// Caller principal
        owner_id: String,
    },
    /// Remove an owned event
    DeleteEvent {
        /// Event id
        event_id: String,
        /// Caller principal
        owner_id: String,
    },
    /// List every ticket
    #[serde(rename = "getAllNFTs")]
    GetAllNfts,
    /// List a user's tickets for one event
    #[serde(rename = "getNFTsForEventForUser")]
    GetNftsForEventForUser {
        /// Event id
        event_id: String,
        /// Holder principal
        user_id: String,
    },
    /// Buy unused tickets of an event
    #[serde(rename = "buyNFTsForEvent")]
    BuyNftsForEvent {
        /// Event id
        event_id: String,
        /// Buyer principal
        owner_id: String,
        /// Number of tickets, as an integer or a decimal string
        #[serde(deserialize_with = "decimal::deserialize")]
        quantity: u64,
    },
    /// Check a ticket belongs to an event
    #[serde(rename = "verifyNFTsForEvent")]
    VerifyNftsForEvent {
        /// Event id
        event_id: String,
        /// Ticket id
        nft_id: String,
    },
}

impl LedgerRequest {
    /// Wire name of the requested operation.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::CreateEvent { .. } => "createEvent",
            Self::GetAllEvents => "getAllEvents",
            Self::GetEventById { .. } => "getEventById",
            Self::GetOwnersEvents { .. } => "getOwnersEvents",
            Self::GetEventsByStatus { .. } => "getEventsByStatus",
            Self::UpdateEvent { .. } => "updateEvent",
            Self::EndEvent { .. } => "endEvent",
            Self::DeleteEvent { .. } => "deleteEvent",
            Self::GetAllNfts => "getAllNFTs",
            Self::GetNftsForEventForUser { .. } => "getNFTsForEventForUser",
            Self::BuyNftsForEvent { .. } => "buyNFTsForEvent",
            Self::VerifyNftsForEvent { .. } => "verifyNFTsForEvent",
        }
    }

    /// Whether the operation can change ledger state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateEvent { .. }
                | Self::UpdateEvent { .. }
                | Self::EndEvent { .. }
                | Self::DeleteEvent { .. }
                | Self::BuyNftsForEvent { .. }
        )
    }
}

/// Successful reply body.
///
/// Untagged: an empty list decodes as [`ReplyPayload::Events`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyPayload {
    /// A single event
    Event(Event),
    /// A list of events
    Events(Vec<Event>),
    /// A list of tickets
    Nfts(Vec<Nft>),
}

impl From<Event> for ReplyPayload {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl From<Vec<Event>> for ReplyPayload {
    fn from(events: Vec<Event>) -> Self {
        Self::Events(events)
    }
}

impl From<Vec<Nft>> for ReplyPayload {
    fn from(nfts: Vec<Nft>) -> Self {
        Self::Nfts(nfts)
    }
}

/// Result of one request: a payload or a human-readable error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerReply {
    /// The operation succeeded
    Ok(ReplyPayload),
    /// The operation failed
    Err(String),
}

impl<T> From<Result<T, LedgerError>> for LedgerReply
where
    T: Into<ReplyPayload>,
{
    fn from(result: Result<T, LedgerError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value.into()),
            Err(err) => Self::Err(err.to_string()),
        }
    }
}

/// Route `request` to the matching ledger operation.
pub async fn dispatch(handle: &LedgerHandle, request: LedgerRequest) -> LedgerReply {
    match request {
        LedgerRequest::CreateEvent { payload } => handle.create_event(payload).await.into(),
        LedgerRequest::GetAllEvents => handle.get_all_events().await.into(),
        LedgerRequest::GetEventById { id } => handle.get_event_by_id(&id).await.into(),
        LedgerRequest::GetOwnersEvents { owner_id } => {
            handle.get_owners_events(&owner_id).await.into()
        }
        LedgerRequest::GetEventsByStatus { status } => {
            handle.get_events_by_status(&status).await.into()
        }
        LedgerRequest::UpdateEvent {
            event_id,
            owner_id,
            payload,
        } => handle
            .update_event(&event_id, &owner_id, payload)
            .await
            .into(),
        LedgerRequest::EndEvent { event_id, owner_id } => {
            handle.end_event(&event_id, &owner_id).await.into()
        }
        LedgerRequest::DeleteEvent { event_id, owner_id } => {
            handle.delete_event(&event_id, &owner_id).await.into()
        }
        LedgerRequest::GetAllNfts => handle.get_all_nfts().await.into(),
        LedgerRequest::GetNftsForEventForUser { event_id, user_id } => handle
            .get_nfts_for_event_for_user(&event_id, &user_id)
            .await
            .into(),
        LedgerRequest::BuyNftsForEvent {
            event_id,
            owner_id,
            quantity,
        } => handle
            .buy_nfts_for_event(&event_id, &owner_id, quantity)
            .await
            .into(),
        LedgerRequest::VerifyNftsForEvent { event_id, nft_id } => handle
            .verify_nfts_for_event(&event_id, &nft_id)
            .await
            .into(),
    }
}

/// Decode one request line.
///
/// # Errors
///
/// Returns the `Malformed request: …` message to send back when the line is
/// not UTF-8 or not a valid request.
pub fn parse_request(line: &[u8]) -> Result<LedgerRequest, String> {
    let text = std::str::from_utf8(line).map_err(|err| format!("Malformed request: {err}"))?;
    serde_json::from_str(text).map_err(|err| format!("Malformed request: {err}"))
}

/// Encode a reply as one JSON line, without the trailing newline.
#[must_use]
pub fn encode_reply(reply: &LedgerReply) -> String {
    serde_json::to_string(reply).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Failed to encode reply");
        r#"{"Err":"Failed to encode reply"}"#.to_string()
    })
}
