//! Shared, concurrently usable access to one ledger.
//!
//! The handle owns the state behind an async `RwLock` together with the
//! reducer and its environment. Commands take the write lock for the whole
//! reduction, so no caller ever observes a half-applied create, purchase or
//! delete. Queries share the read lock.

use crate::metrics;
use crate::reducer::{LedgerAction, LedgerReducer};
use crate::snapshot::LedgerSnapshot;
use crate::state::LedgerState;
use std::sync::Arc;
use std::time::Instant;
use ticket_ledger_core::{Event, EventPayload, LedgerEnvironment, LedgerError, Nft, Reducer, Result};
use tokio::sync::RwLock;

/// Cloneable handle to one ledger.
///
/// # Example
///
/// ```ignore
/// let handle = LedgerHandle::new(LedgerState::new(), LedgerReducer::default(), env);
/// let event = handle.create_event(payload).await?;
/// let count = handle.state(LedgerState::ticket_count).await;
/// ```
#[derive(Clone, Debug)]
pub struct LedgerHandle {
    state: Arc<RwLock<LedgerState>>,
    reducer: LedgerReducer,
    env: LedgerEnvironment,
}

impl LedgerHandle {
    /// Create a handle over `state`.
    #[must_use]
    pub fn new(state: LedgerState, reducer: LedgerReducer, env: LedgerEnvironment) -> Self {
        metrics::set_event_count(state.event_count());
        Self {
            state: Arc::new(RwLock::new(state)),
            reducer,
            env,
        }
    }

    /// Send an action through the reducer.
    ///
    /// Returns the events the action produced; they are already applied.
    ///
    /// # Errors
    ///
    /// Returns the [`LedgerError`] that rejected the command.
    pub async fn send(&self, action: LedgerAction) -> Result<Vec<LedgerAction>> {
        let operation = action.name();
        let mut state = self.state.write().await;
        tracing::trace!(operation, "Acquired write lock on ledger");

        let start = Instant::now();
        let result = self.reducer.reduce(&mut state, action, &self.env);
        metrics::record_duration(operation, start.elapsed());

        observe(operation, &result);
        if let Ok(events) = &result {
            for event in events {
                record_event(event);
            }
        }
        metrics::set_event_count(state.event_count());
        result
    }

    /// Read current state via a closure.
    ///
    /// The read lock is held only while `f` runs.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&LedgerState) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Copy the current contents of both stores.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.state(LedgerState::snapshot).await
    }

    async fn query<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&LedgerState) -> Result<T>,
    {
        let state = self.state.read().await;
        let start = Instant::now();
        let result = f(&state);
        metrics::record_duration(operation, start.elapsed());
        observe(operation, &result);
        result
    }

    async fn command(&self, action: LedgerAction) -> Result<LedgerAction> {
        let operation = action.name();
        self.send(action)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LedgerError::operation(format!("{operation} produced no event")))
    }

    /// Register an event and mint its ticket pool.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Validation`] for an incomplete or undecodable payload, or
    /// a pool over the mint limit.
    pub async fn create_event(&self, payload: EventPayload) -> Result<Event> {
        event_of(self.command(LedgerAction::CreateEvent { payload }).await?)
    }

    /// See [`LedgerState::get_all_events`].
    ///
    /// # Errors
    ///
    /// As [`LedgerState::get_all_events`].
    pub async fn get_all_events(&self) -> Result<Vec<Event>> {
        self.query("getAllEvents", LedgerState::get_all_events).await
    }

    /// See [`LedgerState::get_all_nfts`].
    ///
    /// # Errors
    ///
    /// As [`LedgerState::get_all_nfts`].
    pub async fn get_all_nfts(&self) -> Result<Vec<Nft>> {
        self.query("getAllNFTs", LedgerState::get_all_nfts).await
    }

    /// See [`LedgerState::get_event_by_id`].
    ///
    /// # Errors
    ///
    /// As [`LedgerState::get_event_by_id`].
    pub async fn get_event_by_id(&self, id: &str) -> Result<Event> {
        self.query("getEventById", |state| state.get_event_by_id(id))
            .await
    }

    /// See [`LedgerState::get_owners_events`].
    ///
    /// # Errors
    ///
    /// As [`LedgerState::get_owners_events`].
    pub async fn get_owners_events(&self, owner_id: &str) -> Result<Vec<Event>> {
        self.query("getOwnersEvents", |state| state.get_owners_events(owner_id))
            .await
    }

    /// See [`LedgerState::get_events_by_status`].
    ///
    /// # Errors
    ///
    /// As [`LedgerState::get_events_by_status`].
    pub async fn get_events_by_status(&self, status: &str) -> Result<Vec<Event>> {
        self.query("getEventsByStatus", |state| {
            state.get_events_by_status(status)
        })
        .await
    }

    /// See [`LedgerState::get_nfts_for_event_for_user`].
    ///
    /// # Errors
    ///
    /// As [`LedgerState::get_nfts_for_event_for_user`].
    pub async fn get_nfts_for_event_for_user(&self, event_id: &str, user_id: &str) -> Result<Vec<Nft>> {
        self.query("getNFTsForEventForUser", |state| {
            state.get_nfts_for_event_for_user(event_id, user_id)
        })
        .await
    }

    /// Sell `quantity` unused tickets of `event_id` to `owner_id`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientInventory`] if fewer than `quantity` tickets are unused.
    pub async fn buy_nfts_for_event(&self, event_id: &str, owner_id: &str, quantity: u64) -> Result<Vec<Nft>> {
        let purchased = self
            .command(LedgerAction::BuyNfts {
                event_id: event_id.to_string(),
                owner_id: owner_id.to_string(),
                quantity,
            })
            .await?;
        purchased
            .into_nfts()
            .ok_or_else(|| LedgerError::operation("Failed to buy NFTs for event!"))
    }

    /// See [`LedgerState::verify_nfts_for_event`].
    ///
    /// # Errors
    ///
    /// As [`LedgerState::verify_nfts_for_event`].
    pub async fn verify_nfts_for_event(&self, event_id: &str, nft_id: &str) -> Result<Vec<Nft>> {
        self.query("verifyNFTsForEvent", |state| {
            state.verify_nfts_for_event(event_id, nft_id)
        })
        .await
    }

    /// Merge `payload` over an event owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Validation, NotFound or Unauthorized, as checked by the reducer.
    pub async fn update_event(&self, event_id: &str, owner_id: &str, payload: EventPayload) -> Result<Event> {
        event_of(
            self.command(LedgerAction::UpdateEvent {
                event_id: event_id.to_string(),
                owner_id: owner_id.to_string(),
                payload,
            })
            .await?,
        )
    }

    /// Terminate an event owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Validation, NotFound, Unauthorized, or Conflict if `endDate` is not in the past.
    pub async fn end_event(&self, event_id: &str, owner_id: &str) -> Result<Event> {
        event_of(
            self.command(LedgerAction::EndEvent {
                event_id: event_id.to_string(),
                owner_id: owner_id.to_string(),
            })
            .await?,
        )
    }

    /// Remove an event owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Validation, NotFound, or Unauthorized (the record is removed regardless).
    pub async fn delete_event(&self, event_id: &str, owner_id: &str) -> Result<Event> {
        event_of(
            self.command(LedgerAction::DeleteEvent {
                event_id: event_id.to_string(),
                owner_id: owner_id.to_string(),
            })
            .await?,
        )
    }
}

fn event_of(action: LedgerAction) -> Result<Event> {
    let name = action.name();
    action
        .into_event()
        .ok_or_else(|| LedgerError::operation(format!("{name} carries no event")))
}

/// Log an operation at a level matching its outcome, and count it.
fn observe<T>(operation: &'static str, result: &Result<T>) {
    match result {
        Ok(_) => tracing::debug!(operation, "Ledger operation succeeded"),
        Err(err) if err.is_internal() => {
            tracing::error!(operation, code = err.code(), error = %err, "Ledger operation failed");
        }
        Err(err) => {
            tracing::warn!(operation, code = err.code(), error = %err, "Ledger operation rejected");
        }
    }
    metrics::record_operation(operation, result);
}

fn record_event(event: &LedgerAction) {
    match event {
        LedgerAction::EventCreated { nfts, .. } => {
            metrics::record_minted(u64::try_from(nfts.len()).unwrap_or(u64::MAX));
        }
        LedgerAction::NftsPurchased { quantity, .. } => metrics::record_sold(*quantity),
        _ => {}
    }
}
