//! Domain types for the ticket ledger.
//!
//! Records serialize with the field names existing callers use (`eventName`,
//! `maxNFTs`, `imageUrl`, ...). Counts and timestamps are `u64` internally and
//! decimal strings on the wire.

use crate::encoding::decimal;
use crate::error::{LedgerError, Result};
use crate::validation::{parse_count, parse_key};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random `EventId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `EventId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the canonical lowercase hyphenated form, `None` for anything else
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        parse_key(id).map(Self)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a ticket
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NftId(Uuid);

impl NftId {
    /// Creates a new random `NftId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an `NftId` from a `Uuid`
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse the canonical lowercase hyphenated form, `None` for anything else
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        parse_key(id).map(Self)
    }
}

impl Default for NftId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Event
// ============================================================================

/// Lifecycle flag of an event.
///
/// `Active → Inactive` happens when the owner ends the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Tickets can be bought
    Active,
    /// The event has ended
    Inactive,
}

impl EventStatus {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(LedgerError::validation(format!(
                "Invalid event status: {other}"
            ))),
        }
    }
}

/// An owner-created campaign with a fixed ticket pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, generated at creation
    pub id: EventId,
    /// Display name
    pub event_name: String,
    /// Free text
    pub asset_description: String,
    /// Owning principal; gates update, end and delete
    pub owner_id: String,
    /// Start of the scheduling window (epoch nanoseconds)
    #[serde(with = "decimal")]
    pub start_date: u64,
    /// End of the scheduling window (epoch nanoseconds)
    #[serde(with = "decimal")]
    pub end_date: u64,
    /// Lifecycle flag
    pub status: EventStatus,
    /// Free-form time description, `"ended"` once terminated
    pub event_time: String,
    /// Remaining unsold ticket capacity
    #[serde(rename = "maxNFTs", with = "decimal")]
    pub max_nfts: u64,
    /// Cover art URI
    pub image: String,
}

impl Event {
    /// Build a new event from a creation payload.
    ///
    /// Fields are copied verbatim; counts, timestamps and the status are decoded.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] if a numeric field or the status
    /// cannot be decoded.
    pub fn from_payload(id: EventId, payload: EventPayload) -> Result<Self> {
        let start_date = parse_count("startDate", &payload.start_date)?;
        let end_date = parse_count("endDate", &payload.end_date)?;
        let max_nfts = parse_count("maxNFTs", &payload.max_nfts)?;
        let status = payload.status.parse()?;

        Ok(Self {
            id,
            event_name: payload.event_name,
            asset_description: payload.asset_description,
            owner_id: payload.owner_id,
            start_date,
            end_date,
            status,
            event_time: payload.event_time,
            max_nfts,
            image: payload.image,
        })
    }

    /// Merge an update payload over this event.
    ///
    /// Non-empty payload fields replace the stored value, empty ones keep it.
    /// `owner_id` is the exception: it is always taken from the payload, even
    /// when empty.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] if a non-empty numeric field or
    /// status cannot be decoded.
    pub fn merged_with(&self, payload: EventPayload) -> Result<Self> {
        let start_date = merge_count("startDate", &payload.start_date, self.start_date)?;
        let end_date = merge_count("endDate", &payload.end_date, self.end_date)?;
        let max_nfts = merge_count("maxNFTs", &payload.max_nfts, self.max_nfts)?;
        let status = if payload.status.is_empty() {
            self.status
        } else {
            payload.status.parse()?
        };

        Ok(Self {
            id: self.id,
            event_name: merge_text(payload.event_name, &self.event_name),
            asset_description: merge_text(payload.asset_description, &self.asset_description),
            owner_id: payload.owner_id,
            start_date,
            end_date,
            status,
            event_time: merge_text(payload.event_time, &self.event_time),
            max_nfts,
            image: merge_text(payload.image, &self.image),
        })
    }

    /// The terminal form of this event, ended at `now` (epoch nanoseconds).
    #[must_use]
    pub fn ended_at(&self, now: u64) -> Self {
        Self {
            end_date: now,
            status: EventStatus::Inactive,
            event_time: "ended".to_string(),
            max_nfts: 0,
            image: String::new(),
            ..self.clone()
        }
    }

    /// Whether `principal` is the recorded owner.
    #[must_use]
    pub fn is_owned_by(&self, principal: &str) -> bool {
        self.owner_id == principal
    }
}

fn merge_text(update: String, current: &str) -> String {
    if update.is_empty() {
        current.to_string()
    } else {
        update
    }
}

fn merge_count(field: &str, update: &str, current: u64) -> Result<u64> {
    if update.is_empty() {
        Ok(current)
    } else {
        parse_count(field, update)
    }
}

/// Caller-supplied event fields for create and update.
///
/// Everything is a string as it arrives on the wire; missing fields
/// deserialize as empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPayload {
    /// Display name (required on create)
    pub event_name: String,
    /// Free text (required on create)
    pub asset_description: String,
    /// Owning principal
    pub owner_id: String,
    /// `active` or `inactive` (required on create)
    pub status: String,
    /// Epoch-like end timestamp
    pub end_date: String,
    /// Epoch-like start timestamp
    pub start_date: String,
    /// Free-form time description
    pub event_time: String,
    /// Ticket pool size
    #[serde(rename = "maxNFTs")]
    pub max_nfts: String,
    /// Cover art URI
    pub image: String,
}

impl EventPayload {
    /// Whether the fields required for creation are all present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.event_name.is_empty() && !self.asset_description.is_empty() && !self.status.is_empty()
    }
}

// ============================================================================
// NFT
// ============================================================================

/// One ticket of an event's pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nft {
    /// Unique identifier, generated at mint time
    pub id: NftId,
    /// Event this ticket belongs to (lookup only)
    pub event_id: EventId,
    /// Copied from the event image at mint time
    pub image_url: String,
    /// Current holder
    pub owner: String,
    /// Purchased/consumed flag; never reverts
    pub used: bool,
}

impl Nft {
    /// A fresh, unused ticket for `event`, held by the event owner.
    #[must_use]
    pub fn minted_for(id: NftId, event: &Event) -> Self {
        Self {
            id,
            event_id: event.id,
            image_url: event.image.clone(),
            owner: event.owner_id.clone(),
            used: false,
        }
    }

    /// Hand the ticket to `owner` and mark it used.
    pub fn sell_to(&mut self, owner: &str) {
        self.owner = owner.to_string();
        self.used = true;
    }
}
