//! End-to-end flows through the shared ledger handle.
//!
//! Covers the create → buy → query path, ownership enforcement across every
//! owner-gated operation, and the time-dependent `endEvent` transition.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::Duration;
use std::sync::Arc;
use ticket_ledger::{LedgerHandle, LedgerReducer, LedgerState};
use ticket_ledger_core::{EventStatus, LedgerEnvironment, LedgerError};
use ticket_ledger_testing::fixtures::gig_payload;
use ticket_ledger_testing::{
    BUYER_ID, ManualClock, OWNER_ID, PayloadBuilder, STRANGER_ID, SequentialIdGenerator,
    test_environment,
};

// ============================================================================
// Test Fixtures
// ============================================================================

fn ledger() -> LedgerHandle {
    LedgerHandle::new(LedgerState::new(), LedgerReducer::default(), test_environment())
}

fn ledger_with_clock(clock: Arc<ManualClock>) -> LedgerHandle {
    let env = LedgerEnvironment::new(clock, Arc::new(SequentialIdGenerator::new()));
    LedgerHandle::new(LedgerState::new(), LedgerReducer::default(), env)
}

// ============================================================================
// Purchase flow
// ============================================================================

#[tokio::test]
async fn gig_with_three_tickets_sells_two() {
    let ledger = ledger();

    let event = ledger.create_event(gig_payload()).await.unwrap();
    let event_id = event.id.to_string();

    let nfts = ledger.get_all_nfts().await.unwrap();
    assert_eq!(nfts.len(), 3);
    assert!(nfts.iter().all(|nft| nft.event_id == event.id));

    let bought = ledger
        .buy_nfts_for_event(&event_id, BUYER_ID, 2)
        .await
        .unwrap();
    assert_eq!(bought.len(), 2);
    assert!(bought.iter().all(|nft| nft.used && nft.owner == BUYER_ID));

    let event = ledger.get_event_by_id(&event_id).await.unwrap();
    assert_eq!(event.max_nfts, 1);

    let held = ledger
        .get_nfts_for_event_for_user(&event_id, BUYER_ID)
        .await
        .unwrap();
    assert_eq!(held, bought);

    for nft in &bought {
        assert_eq!(
            ledger
                .verify_nfts_for_event(&event_id, &nft.id.to_string())
                .await,
            Ok(Vec::new())
        );
    }
}

#[tokio::test]
async fn selling_out_then_buying_more_is_rejected() {
    let ledger = ledger();
    let event = ledger.create_event(gig_payload()).await.unwrap();
    let event_id = event.id.to_string();

    ledger
        .buy_nfts_for_event(&event_id, BUYER_ID, 3)
        .await
        .unwrap();
    let before = ledger.snapshot().await;

    assert!(matches!(
        ledger.buy_nfts_for_event(&event_id, STRANGER_ID, 1).await,
        Err(LedgerError::InsufficientInventory(_))
    ));
    assert_eq!(ledger.snapshot().await, before);
}

#[tokio::test]
async fn tickets_of_one_event_never_satisfy_another() {
    let ledger = ledger();
    let small = ledger
        .create_event(PayloadBuilder::new().max_nfts(1).build())
        .await
        .unwrap();
    let large = ledger
        .create_event(PayloadBuilder::new().max_nfts(5).build())
        .await
        .unwrap();

    assert!(ledger
        .buy_nfts_for_event(&small.id.to_string(), BUYER_ID, 2)
        .await
        .is_err());

    let large_ticket = ledger
        .get_nfts_for_event_for_user(&large.id.to_string(), OWNER_ID)
        .await
        .unwrap()
        .remove(0);
    assert_eq!(
        ledger
            .verify_nfts_for_event(&small.id.to_string(), &large_ticket.id.to_string())
            .await,
        Err(LedgerError::not_found("Invalid NFT for this event."))
    );
}

// ============================================================================
// Ownership
// ============================================================================

#[tokio::test]
async fn strangers_cannot_update_end_or_delete() {
    let ledger = ledger();
    let event = ledger.create_event(gig_payload()).await.unwrap();
    let event_id = event.id.to_string();

    assert!(matches!(
        ledger
            .update_event(&event_id, STRANGER_ID, PayloadBuilder::new().build())
            .await,
        Err(LedgerError::Unauthorized(_))
    ));
    assert!(matches!(
        ledger.end_event(&event_id, STRANGER_ID).await,
        Err(LedgerError::Unauthorized(_))
    ));
    assert_eq!(ledger.get_event_by_id(&event_id).await.unwrap(), event);

    // Delete removes before it checks.
    assert!(matches!(
        ledger.delete_event(&event_id, STRANGER_ID).await,
        Err(LedgerError::Unauthorized(_))
    ));
    assert!(ledger.get_all_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_hands_the_event_to_a_new_owner() {
    let ledger = ledger();
    let event = ledger.create_event(gig_payload()).await.unwrap();
    let event_id = event.id.to_string();

    ledger
        .update_event(
            &event_id,
            OWNER_ID,
            PayloadBuilder::empty().owner_id(BUYER_ID).build(),
        )
        .await
        .unwrap();

    assert!(ledger.get_owners_events(OWNER_ID).await.unwrap().is_empty());
    assert_eq!(ledger.get_owners_events(BUYER_ID).await.unwrap().len(), 1);
    assert!(matches!(
        ledger.end_event(&event_id, OWNER_ID).await,
        Err(LedgerError::Unauthorized(_))
    ));
    assert!(ledger.end_event(&event_id, BUYER_ID).await.is_ok());
}

// ============================================================================
// Ending events
// ============================================================================

#[tokio::test]
async fn ended_events_move_to_inactive() {
    let ledger = ledger();
    let event = ledger.create_event(gig_payload()).await.unwrap();

    let ended = ledger
        .end_event(&event.id.to_string(), OWNER_ID)
        .await
        .unwrap();

    assert_eq!(ended.status, EventStatus::Inactive);
    assert_eq!(ended.max_nfts, 0);
    assert!(ledger.get_events_by_status("active").await.unwrap().is_empty());
    assert_eq!(
        ledger.get_events_by_status("inactive").await.unwrap(),
        vec![ended]
    );
}

#[tokio::test]
async fn ending_twice_conflicts_until_time_moves_on() {
    let clock = Arc::new(ManualClock::starting_at_test_time());
    let ledger = ledger_with_clock(Arc::clone(&clock));
    let event = ledger.create_event(gig_payload()).await.unwrap();
    let event_id = event.id.to_string();

    let first = ledger.end_event(&event_id, OWNER_ID).await.unwrap();

    assert_eq!(
        ledger.end_event(&event_id, OWNER_ID).await,
        Err(LedgerError::conflict("Event already ended!"))
    );

    clock.advance(Duration::seconds(1));
    let second = ledger.end_event(&event_id, OWNER_ID).await.unwrap();
    assert_eq!(second.end_date, first.end_date + 1_000_000_000);
}

#[tokio::test]
async fn events_ending_in_the_future_cannot_be_ended_yet() {
    let clock = Arc::new(ManualClock::starting_at_test_time());
    let ledger = ledger_with_clock(Arc::clone(&clock));
    let later = 1_735_689_600_000_000_000 + 3_600_000_000_000;
    let event = ledger
        .create_event(PayloadBuilder::new().end_date(later).build())
        .await
        .unwrap();
    let event_id = event.id.to_string();

    assert!(matches!(
        ledger.end_event(&event_id, OWNER_ID).await,
        Err(LedgerError::Conflict(_))
    ));

    clock.advance(Duration::hours(2));
    assert!(ledger.end_event(&event_id, OWNER_ID).await.is_ok());
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn malformed_ids_are_rejected_before_lookup() {
    let ledger = ledger();
    let event = ledger.create_event(gig_payload()).await.unwrap();
    let event_id = event.id.to_string();

    let validation = |result: Result<_, LedgerError>| matches!(result, Err(LedgerError::Validation(_)));

    assert!(validation(ledger.get_event_by_id("123").await.map(|_| ())));
    assert!(validation(ledger.get_owners_events("alice").await.map(|_| ())));
    assert!(validation(
        ledger
            .update_event(&event_id, "alice", gig_payload())
            .await
            .map(|_| ())
    ));
    assert!(validation(ledger.end_event("123", OWNER_ID).await.map(|_| ())));
    assert!(validation(ledger.delete_event(&event_id, "").await.map(|_| ())));
    assert!(validation(
        ledger
            .verify_nfts_for_event(&event_id, "ticket")
            .await
            .map(|_| ())
    ));

    assert_eq!(ledger.get_all_events().await.unwrap(), vec![event]);
}

#[tokio::test]
async fn unknown_status_and_missing_fields_are_validation_errors() {
    let ledger = ledger();

    assert_eq!(
        ledger.get_events_by_status("archived").await,
        Err(LedgerError::validation("Invalid event status: archived"))
    );
    assert_eq!(
        ledger
            .create_event(PayloadBuilder::new().event_name("").build())
            .await,
        Err(LedgerError::validation("Incomplete input data!"))
    );
    assert!(matches!(
        ledger
            .create_event(PayloadBuilder::new().raw_max_nfts("-1").build())
            .await,
        Err(LedgerError::Validation(_))
    ));
    assert!(ledger.get_all_nfts().await.unwrap().is_empty());
}
