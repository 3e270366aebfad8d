//! The ledger reducer: commands, events and business rules.
//!
//! Every mutating operation is a command. The reducer validates it against the
//! current state and, if it passes, turns it into an event that is applied to
//! the state and returned. Two commands keep gaps that existing callers rely on:
//!
//! - `DeleteEvent` removes the record before checking ownership, and does not
//!   put it back when the check fails.
//! - `BuyNfts` commits ticket ownership even when the event record is gone, in
//!   which case no capacity is decremented.

use crate::config::LedgerConfig;
use crate::state::LedgerState;
use ticket_ledger_core::{
    Event, EventId, EventPayload, LedgerEnvironment, LedgerError, Nft, NftId, Reducer, Result,
    is_valid_uuid,
};
use tracing::{debug, info, warn};

// ============================================================================
// Actions
// ============================================================================

/// Commands and events of the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerAction {
    // Commands
    /// Register an event and mint its ticket pool
    CreateEvent {
        /// Event fields as sent by the caller
        payload: EventPayload,
    },
    /// Merge fields into an owned event
    UpdateEvent {
        /// Event id
        event_id: String,
        /// Caller principal
        owner_id: String,
        /// Replacement fields
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
    /// Sell unused tickets of an event
    BuyNfts {
        /// Event id
        event_id: String,
        /// Buyer principal
        owner_id: String,
        /// Number of tickets
        quantity: u64,
    },

    // Events
    /// An event was registered with its minted tickets
    EventCreated {
        /// The stored event
        event: Event,
        /// Its ticket pool, held by the owner
        nfts: Vec<Nft>,
    },
    /// An event's fields were replaced
    EventUpdated {
        /// The stored event after the merge
        event: Event,
    },
    /// An event reached its terminal state
    EventEnded {
        /// The stored event after ending
        event: Event,
    },
    /// An event record was removed
    EventDeleted {
        /// The removed event
        event: Event,
    },
    /// Tickets changed hands
    NftsPurchased {
        /// Event id as given by the buyer
        event_id: String,
        /// The sold tickets, already reassigned and marked used
        nfts: Vec<Nft>,
        /// Capacity to take off the event
        quantity: u64,
    },
}

impl LedgerAction {
    /// Wire name of a command, or the event name for events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateEvent { .. } => "createEvent",
            Self::UpdateEvent { .. } => "updateEvent",
            Self::EndEvent { .. } => "endEvent",
            Self::DeleteEvent { .. } => "deleteEvent",
            Self::BuyNfts { .. } => "buyNFTsForEvent",
            Self::EventCreated { .. } => "EventCreated",
            Self::EventUpdated { .. } => "EventUpdated",
            Self::EventEnded { .. } => "EventEnded",
            Self::EventDeleted { .. } => "EventDeleted",
            Self::NftsPurchased { .. } => "NftsPurchased",
        }
    }

    /// The event record carried by an event-lifecycle event.
    #[must_use]
    pub fn into_event(self) -> Option<Event> {
        match self {
            Self::EventCreated { event, .. }
            | Self::EventUpdated { event }
            | Self::EventEnded { event }
            | Self::EventDeleted { event } => Some(event),
            _ => None,
        }
    }

    /// The tickets carried by a purchase.
    #[must_use]
    pub fn into_nfts(self) -> Option<Vec<Nft>> {
        match self {
            Self::NftsPurchased { nfts, .. } => Some(nfts),
            _ => None,
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer enforcing the ledger's business rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerReducer {
    config: LedgerConfig,
}

impl LedgerReducer {
    /// Creates a reducer enforcing `config`'s limits
    #[must_use]
    pub const fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    /// Validates `CreateEvent` and builds the event with its ticket pool
    fn create_event(&self, payload: EventPayload, env: &LedgerEnvironment) -> Result<LedgerAction> {
        if !payload.is_complete() {
            return Err(LedgerError::validation("Incomplete input data!"));
        }

        let event = Event::from_payload(EventId::from_uuid(env.ids.next_id()), payload)?;

        if event.max_nfts > self.config.max_mint_per_event {
            return Err(LedgerError::validation(format!(
                "Cannot mint {} NFTs for one event (limit {})",
                event.max_nfts, self.config.max_mint_per_event
            )));
        }

        let nfts = (0..event.max_nfts)
            .map(|_| Nft::minted_for(NftId::from_uuid(env.ids.next_id()), &event))
            .collect();

        Ok(LedgerAction::EventCreated { event, nfts })
    }

    /// Validates `UpdateEvent` and merges the payload
    fn update_event(
        state: &LedgerState,
        event_id: &str,
        owner_id: &str,
        payload: EventPayload,
    ) -> Result<LedgerAction> {
        if !ids_are_valid(event_id, owner_id) {
            return Err(LedgerError::validation(
                "Invalid event or owner ID for updating an event.",
            ));
        }

        let existing = find_event(state, event_id).ok_or_else(|| {
            LedgerError::not_found(format!("Failed to update event with id: {event_id}!"))
        })?;

        if !existing.is_owned_by(owner_id) {
            return Err(LedgerError::unauthorized("Only the owner can update this event!"));
        }

        Ok(LedgerAction::EventUpdated {
            event: existing.merged_with(payload)?,
        })
    }

    /// Validates `EndEvent`: the stored end date must already be in the past
    fn end_event(
        state: &LedgerState,
        event_id: &str,
        owner_id: &str,
        env: &LedgerEnvironment,
    ) -> Result<LedgerAction> {
        if !ids_are_valid(event_id, owner_id) {
            return Err(LedgerError::validation(
                "Invalid event or owner ID for ending an event.",
            ));
        }

        let existing = find_event(state, event_id).ok_or_else(|| {
            LedgerError::not_found(format!("Failed to end event with id: {event_id}!"))
        })?;

        if !existing.is_owned_by(owner_id) {
            return Err(LedgerError::unauthorized("Only the owner can end this event!"));
        }

        let now = env.now_nanos()?;
        if existing.end_date >= now {
            return Err(LedgerError::conflict("Event already ended!"));
        }

        Ok(LedgerAction::EventEnded {
            event: existing.ended_at(now),
        })
    }

    /// Selects tickets for `BuyNfts`; nothing is selected unless all `quantity` are available
    fn buy_nfts(state: &LedgerState, event_id: String, owner_id: &str, quantity: u64) -> Result<LedgerAction> {
        let wanted = usize::try_from(quantity).unwrap_or(usize::MAX);
        let selected = state.unused_tickets(EventId::parse(&event_id), wanted);

        if selected.len() < wanted {
            return Err(LedgerError::insufficient_inventory(
                "Not enough available NFTs for this event.",
            ));
        }

        let nfts = selected
            .into_iter()
            .map(|nft| {
                let mut sold = nft.clone();
                sold.sell_to(owner_id);
                sold
            })
            .collect();

        Ok(LedgerAction::NftsPurchased {
            event_id,
            nfts,
            quantity,
        })
    }

    /// Applies an event to state
    fn apply_event(state: &mut LedgerState, action: &LedgerAction) {
        match action {
            LedgerAction::EventCreated { event, nfts } => {
                for nft in nfts {
                    state.tickets.insert(nft.id, nft.clone());
                }
                state.events.insert(event.id, event.clone());
            }
            LedgerAction::EventUpdated { event } | LedgerAction::EventEnded { event } => {
                state.events.insert(event.id, event.clone());
            }
            LedgerAction::EventDeleted { event } => {
                state.events.remove(&event.id);
            }
            LedgerAction::NftsPurchased {
                event_id,
                nfts,
                quantity,
            } => {
                for nft in nfts {
                    state.tickets.insert(nft.id, nft.clone());
                }
                match EventId::parse(event_id).and_then(|id| state.events.get_mut(&id)) {
                    Some(event) => event.max_nfts = event.max_nfts.saturating_sub(*quantity),
                    None => warn!(event_id = %event_id, "Tickets sold for an event that is no longer stored"),
                }
            }
            // Commands are never applied directly
            LedgerAction::CreateEvent { .. }
            | LedgerAction::UpdateEvent { .. }
            | LedgerAction::EndEvent { .. }
            | LedgerAction::DeleteEvent { .. }
            | LedgerAction::BuyNfts { .. } => {}
        }
    }

    /// Applies `event` and returns it as the command's outcome
    fn commit(state: &mut LedgerState, event: LedgerAction) -> Vec<LedgerAction> {
        Self::apply_event(state, &event);
        vec![event]
    }
}

impl Reducer for LedgerReducer {
    type State = LedgerState;
    type Action = LedgerAction;
    type Environment = LedgerEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<Vec<Self::Action>> {
        match action {
            // ========== Commands ==========
            LedgerAction::CreateEvent { payload } => {
                let created = self.create_event(payload, env)?;
                if let LedgerAction::EventCreated { event, nfts } = &created {
                    info!(event_id = %event.id, owner_id = %event.owner_id, minted = nfts.len(), "Event created");
                }
                Ok(Self::commit(state, created))
            }

            LedgerAction::UpdateEvent {
                event_id,
                owner_id,
                payload,
            } => {
                let updated = Self::update_event(state, &event_id, &owner_id, payload)?;
                debug!(event_id = %event_id, "Event updated");
                Ok(Self::commit(state, updated))
            }

            LedgerAction::EndEvent { event_id, owner_id } => {
                let ended = Self::end_event(state, &event_id, &owner_id, env)?;
                info!(event_id = %event_id, "Event ended");
                Ok(Self::commit(state, ended))
            }

            LedgerAction::DeleteEvent { event_id, owner_id } => {
                if !ids_are_valid(&event_id, &owner_id) {
                    return Err(LedgerError::validation(
                        "Invalid event or owner ID for deleting an event.",
                    ));
                }

                let removed = find_event(state, &event_id).cloned().ok_or_else(|| {
                    LedgerError::not_found(format!("Failed to delete event with id: {event_id}"))
                })?;
                let owned = removed.is_owned_by(&owner_id);
                let deleted = Self::commit(state, LedgerAction::EventDeleted { event: removed });

                if !owned {
                    warn!(event_id = %event_id, "Delete by non-owner; event stays removed");
                    return Err(LedgerError::unauthorized("Only owner can delete event!"));
                }

                info!(event_id = %event_id, "Event deleted");
                Ok(deleted)
            }

            LedgerAction::BuyNfts {
                event_id,
                owner_id,
                quantity,
            } => {
                let purchased = Self::buy_nfts(state, event_id, &owner_id, quantity)?;
                info!(owner_id = %owner_id, quantity, "Tickets sold");
                Ok(Self::commit(state, purchased))
            }

            // ========== Events ==========
            event => {
                Self::apply_event(state, &event);
                Ok(Vec::new())
            }
        }
    }
}

/// Both ids must be UUIDs before any owner-gated command touches the store.
fn ids_are_valid(event_id: &str, owner_id: &str) -> bool {
    is_valid_uuid(event_id) && is_valid_uuid(owner_id)
}

fn find_event<'a>(state: &'a LedgerState, event_id: &str) -> Option<&'a Event> {
    EventId::parse(event_id).and_then(|id| state.events.get(&id))
}
