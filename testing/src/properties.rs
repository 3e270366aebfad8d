//! Property-based testing strategies using proptest.

use proptest::prelude::*;
use ticket_ledger_core::EventPayload;
use uuid::Uuid;

/// Hyphenated lowercase UUID strings
pub fn principal_id() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|bits| Uuid::from_u128(bits).to_string())
}

/// `active` or `inactive`
pub fn status() -> impl Strategy<Value = String> {
    prop_oneof![Just("active".to_string()), Just("inactive".to_string())]
}

/// Complete creation payloads with a ticket pool of `0..=max_tickets`
pub fn event_payload(max_tickets: u64) -> impl Strategy<Value = EventPayload> {
    (
        "[A-Za-z][A-Za-z ]{0,23}",
        "[a-z][a-z ]{0,47}",
        principal_id(),
        status(),
        0..=max_tickets,
        "[a-z]{0,12}",
    )
        .prop_map(
            |(event_name, asset_description, owner_id, status, max_nfts, image)| EventPayload {
                event_name,
                asset_description,
                owner_id,
                status,
                end_date: "0".to_string(),
                start_date: "0".to_string(),
                event_time: String::new(),
                max_nfts: max_nfts.to_string(),
                image,
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_ledger_core::is_valid_uuid;

    proptest! {
        #[test]
        fn principal_ids_are_valid_uuids(id in principal_id()) {
            prop_assert!(is_valid_uuid(&id));
        }

        #[test]
        fn generated_payloads_are_complete(payload in event_payload(16)) {
            prop_assert!(payload.is_complete());
        }
    }
}
