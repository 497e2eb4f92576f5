//! Property tests for conversion purity and structural equality

use custom_events::{is_blank_tag, CustomEvent, EventData, EventError, Eventable};
use proptest::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Eventable)]
#[eventable(event_type = "payment_rejected")]
struct PaymentRejected {
    customer_id: String,
    amount: u64,
    currency: String,
    retries: Vec<u16>,
}

fn payment_rejected() -> impl Strategy<Value = PaymentRejected> {
    (
        "[a-z0-9]{1,12}",
        any::<u64>(),
        "[A-Z]{3}",
        prop::collection::vec(any::<u16>(), 0..4),
    )
        .prop_map(|(customer_id, amount, currency, retries)| PaymentRejected {
            customer_id,
            amount,
            currency,
            retries,
        })
}

proptest! {
    #[test]
    fn conversion_is_deterministic_and_non_mutating(instance in payment_rejected()) {
        let before = instance.clone();

        let first = instance.to_event();
        let second = instance.to_event();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&instance, &before);
        prop_assert_eq!(first.data().map(EventData::len), Some(4));
    }

    #[test]
    fn derived_data_matches_fields(instance in payment_rejected()) {
        let event = instance.to_event();
        let data = event.data().unwrap();

        let field = |key: &str| data.get_json(key).cloned();

        prop_assert_eq!(field("customer_id"), Some(serde_json::json!(instance.customer_id)));
        prop_assert_eq!(field("amount"), Some(serde_json::json!(instance.amount)));
        prop_assert_eq!(field("retries"), Some(serde_json::json!(instance.retries)));
    }

    #[test]
    fn identity_conversion_round_trips(
        event_type in prop_oneof!["[ \t\n]{0,4}", "[ \ta-z_]{1,16}"],
        entries in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..6),
    ) {
        let blank = is_blank_tag(&event_type);
        let result = CustomEvent::with_data(event_type, entries.into_iter().collect::<EventData>());

        if blank {
            prop_assert!(matches!(result, Err(EventError::MissingRequiredField("type"))));
            return Ok(());
        }

        let event = result.unwrap();
        prop_assert_eq!(event.to_event(), event.clone());

        let decoded: CustomEvent = serde_json::from_value(event.to_json().unwrap()).unwrap();
        prop_assert_eq!(decoded, event);
    }

    #[test]
    fn equality_ignores_insertion_order(
        entries in prop::collection::vec(("[a-z]{1,6}", any::<i32>()), 0..8),
    ) {
        let mut deduped = std::collections::BTreeMap::new();
        for (key, value) in entries {
            deduped.insert(key, value);
        }

        let forward: EventData = deduped.clone().into_iter().collect();
        let reverse: EventData = deduped.into_iter().rev().collect();

        prop_assert_eq!(forward, reverse);
    }
}
