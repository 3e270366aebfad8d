//! Ledger state and its read-only queries.
//!
//! `LedgerState` holds the event and ticket stores. It is only mutated by
//! [`LedgerReducer`](crate::reducer::LedgerReducer); the query methods here
//! never change it, so they run under a shared read lock.
//!
//! Record keys are matched as text: only the canonical lowercase spelling of an
//! id names a stored record, even though uppercase ids pass format validation.

use crate::snapshot::LedgerSnapshot;
use crate::store::{EventStore, TicketStore};
use ticket_ledger_core::{
    Event, EventId, EventStatus, LedgerError, Nft, NftId, Result, is_valid_uuid,
};

/// Event and ticket records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerState {
    pub(crate) events: EventStore,
    pub(crate) tickets: TicketStore,
}

impl LedgerState {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: EventStore::new(),
            tickets: TicketStore::new(),
        }
    }

    /// Number of stored events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of stored tickets.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
    }

    /// Copy both stores into a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            events: self.events.values(),
            nfts: self.tickets.values(),
        }
    }

    // ========== Queries ==========

    /// Every stored event.
    ///
    /// # Errors
    ///
    /// Only on an unexpected internal fault.
    pub fn get_all_events(&self) -> Result<Vec<Event>> {
        Ok(self.events.values())
    }

    /// Every stored ticket.
    ///
    /// # Errors
    ///
    /// Only on an unexpected internal fault.
    pub fn get_all_nfts(&self) -> Result<Vec<Nft>> {
        Ok(self.tickets.values())
    }

    /// Look up one event.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Validation`] if `id` is not a UUID (the store is not consulted).
    /// - [`LedgerError::NotFound`] if there is no such event.
    pub fn get_event_by_id(&self, id: &str) -> Result<Event> {
        if !is_valid_uuid(id) {
            return Err(LedgerError::validation("Invalid event ID"));
        }

        EventId::parse(id)
            .and_then(|key| self.events.get(&key))
            .cloned()
            .ok_or_else(|| {
                LedgerError::not_found(format!(
                    "Event with the provided id: {id} has not been found!"
                ))
            })
    }

    /// Every event owned by `owner_id`, in enumeration order.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Validation`] if `owner_id` is not a UUID.
    pub fn get_owners_events(&self, owner_id: &str) -> Result<Vec<Event>> {
        if !is_valid_uuid(owner_id) {
            return Err(LedgerError::validation("Invalid owner ID"));
        }

        Ok(self
            .events
            .iter()
            .filter(|event| event.is_owned_by(owner_id))
            .cloned()
            .collect())
    }

    /// Every event whose status is `status`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Validation`] if `status` is neither `active` nor `inactive`.
    pub fn get_events_by_status(&self, status: &str) -> Result<Vec<Event>> {
        let status: EventStatus = status.parse()?;

        Ok(self
            .events
            .iter()
            .filter(|event| event.status == status)
            .cloned()
            .collect())
    }

    /// Tickets of `event_id` currently held by `user_id`.
    ///
    /// Ids are not validated here: anything but a canonical event id matches nothing.
    ///
    /// # Errors
    ///
    /// Only on an unexpected internal fault.
    pub fn get_nfts_for_event_for_user(&self, event_id: &str, user_id: &str) -> Result<Vec<Nft>> {
        let Some(event_id) = EventId::parse(event_id) else {
            return Ok(Vec::new());
        };

        Ok(self
            .tickets
            .iter()
            .filter(|nft| nft.event_id == event_id && nft.owner == user_id)
            .cloned()
            .collect())
    }

    /// Check whether `nft_id` is a ticket of `event_id`.
    ///
    /// Polarity is inherited from existing callers: a match returns `Ok` with an
    /// empty list, a miss returns an error.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Validation`] if either id is not a UUID.
    /// - [`LedgerError::NotFound`] (`"Invalid NFT for this event."`) if the ticket
    ///   does not exist or belongs to another event.
    pub fn verify_nfts_for_event(&self, event_id: &str, nft_id: &str) -> Result<Vec<Nft>> {
        if !is_valid_uuid(event_id) || !is_valid_uuid(nft_id) {
            return Err(LedgerError::validation(
                "Invalid event ID or NFT IDs for verifying NFTs.",
            ));
        }

        let matches = match (EventId::parse(event_id), NftId::parse(nft_id)) {
            (Some(event_id), Some(nft_id)) => self
                .tickets
                .get(&nft_id)
                .is_some_and(|nft| nft.event_id == event_id),
            _ => false,
        };

        if matches {
            Ok(Vec::new())
        } else {
            Err(LedgerError::not_found("Invalid NFT for this event."))
        }
    }

    /// Up to `limit` unused tickets of `event_id`, in enumeration order.
    pub(crate) fn unused_tickets(&self, event_id: Option<EventId>, limit: usize) -> Vec<&Nft> {
        self.tickets
            .iter()
            .filter(|nft| Some(nft.event_id) == event_id && !nft.used)
            .take(limit)
            .collect()
    }
}

impl From<LedgerSnapshot> for LedgerState {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Self {
            events: snapshot.events.into_iter().map(|event| (event.id, event)).collect(),
            tickets: snapshot.nfts.into_iter().map(|nft| (nft.id, nft)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use ticket_ledger_core::EventPayload;
    use ticket_ledger_testing::fixtures::{OWNER_ID, STRANGER_ID, gig_payload};
    use ticket_ledger_testing::PayloadBuilder;

    fn state_with(payloads: Vec<EventPayload>) -> (LedgerState, Vec<Event>) {
        let mut state = LedgerState::new();
        let mut events = Vec::new();
        for payload in payloads {
            let event = Event::from_payload(EventId::new(), payload).unwrap();
            for _ in 0..event.max_nfts {
                let nft = Nft::minted_for(NftId::new(), &event);
                state.tickets.insert(nft.id, nft);
            }
            state.events.insert(event.id, event.clone());
            events.push(event);
        }
        (state, events)
    }

    #[test]
    fn get_event_by_id_validates_before_lookup() {
        let state = LedgerState::new();
        assert_eq!(
            state.get_event_by_id("not-a-uuid"),
            Err(LedgerError::validation("Invalid event ID"))
        );
    }

    #[test]
    fn get_event_by_id_reports_missing_events() {
        let state = LedgerState::new();
        let id = "44444444-4444-4444-4444-444444444444";
        assert_eq!(
            state.get_event_by_id(id),
            Err(LedgerError::not_found(format!(
                "Event with the provided id: {id} has not been found!"
            )))
        );
    }

    #[test]
    fn uppercase_ids_are_valid_but_name_no_record() {
        let (state, events) = state_with(vec![gig_payload()]);
        let upper = events[0].id.to_string().to_uppercase();

        assert_eq!(
            state.get_event_by_id(&upper),
            Err(LedgerError::not_found(format!(
                "Event with the provided id: {upper} has not been found!"
            )))
        );
        assert_eq!(
            state.get_nfts_for_event_for_user(&upper, OWNER_ID).unwrap(),
            Vec::new()
        );

        let nft = state.get_all_nfts().unwrap().remove(0);
        assert_eq!(
            state.verify_nfts_for_event(&upper, &nft.id.to_string()),
            Err(LedgerError::not_found("Invalid NFT for this event."))
        );
    }

    #[test]
    fn owners_events_filters_by_owner() {
        let (state, events) = state_with(vec![
            gig_payload(),
            PayloadBuilder::new().owner_id(STRANGER_ID).build(),
        ]);

        assert_eq!(state.get_owners_events(OWNER_ID).unwrap(), vec![events[0].clone()]);
        assert_eq!(
            state.get_owners_events("owner"),
            Err(LedgerError::validation("Invalid owner ID"))
        );
    }

    #[test]
    fn events_by_status_filters_and_validates() {
        let (state, events) = state_with(vec![
            gig_payload(),
            PayloadBuilder::new().status("inactive").build(),
        ]);

        assert_eq!(state.get_events_by_status("active").unwrap(), vec![events[0].clone()]);
        assert_eq!(state.get_events_by_status("inactive").unwrap(), vec![events[1].clone()]);
        assert_eq!(
            state.get_events_by_status("ACTIVE"),
            Err(LedgerError::validation("Invalid event status: ACTIVE"))
        );
    }

    #[test]
    fn nfts_for_user_ignores_malformed_ids() {
        let (state, _) = state_with(vec![gig_payload()]);
        assert_eq!(
            state.get_nfts_for_event_for_user("garbage", OWNER_ID).unwrap(),
            Vec::new()
        );
    }

    #[test]
    fn verify_succeeds_with_empty_list_for_a_matching_ticket() {
        let (state, events) = state_with(vec![gig_payload()]);
        let nft = state.get_all_nfts().unwrap().remove(0);

        assert_eq!(
            state.verify_nfts_for_event(&events[0].id.to_string(), &nft.id.to_string()),
            Ok(Vec::new())
        );
    }

    #[test]
    fn verify_fails_for_a_ticket_of_another_event() {
        let (state, events) = state_with(vec![gig_payload(), gig_payload()]);
        let foreign = state
            .get_all_nfts()
            .unwrap()
            .into_iter()
            .find(|nft| nft.event_id != events[0].id)
            .unwrap();

        assert_eq!(
            state.verify_nfts_for_event(&events[0].id.to_string(), &foreign.id.to_string()),
            Err(LedgerError::not_found("Invalid NFT for this event."))
        );
        assert_eq!(
            state.verify_nfts_for_event("bad", &foreign.id.to_string()),
            Err(LedgerError::validation(
                "Invalid event ID or NFT IDs for verifying NFTs."
            ))
        );
    }

    #[test]
    fn snapshot_round_trips_through_from() {
        let (state, _) = state_with(vec![gig_payload(), gig_payload()]);
        assert_eq!(LedgerState::from(state.snapshot()), state);
    }
}
