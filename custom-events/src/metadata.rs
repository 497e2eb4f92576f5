//! Uniform handling of the values a log call may attach as event metadata

use crate::error::{EventError, Result};
use crate::event::CustomEvent;
use crate::event_data::json_kind;
use crate::event_type::EventType;
use crate::eventable::Eventable;
use serde_json::{Map, Value};

/// Closed set of event sources accepted at a log call site
pub enum EventMetadata<'a> {
    /// Already canonical, passed through unchanged
    Event(CustomEvent),
    /// Raw `{event_type: data}` mapping
    Raw(Map<String, Value>),
    /// Any type with the capability
    Derived(&'a dyn Eventable),
}

impl EventMetadata<'_> {
    /// Normalize into a [`CustomEvent`]
    ///
    /// # Errors
    ///
    /// Only raw mappings can fail, see [`CustomEvent::from_raw`].
    pub fn resolve(self) -> Result<CustomEvent> {
        match self {
            Self::Event(event) => Ok(event),
            Self::Raw(map) => CustomEvent::from_raw(map),
            Self::Derived(source) => Ok(source.to_event()),
        }
    }
}

impl From<CustomEvent> for EventMetadata<'_> {
    fn from(event: CustomEvent) -> Self {
        Self::Event(event)
    }
}

impl From<Map<String, Value>> for EventMetadata<'_> {
    fn from(map: Map<String, Value>) -> Self {
        Self::Raw(map)
    }
}

impl<'a, T: Eventable> From<&'a T> for EventMetadata<'a> {
    fn from(source: &'a T) -> Self {
        Self::Derived(source)
    }
}

impl CustomEvent {
    /// Wrap a raw single-key mapping: the key is the type, the value the data
    ///
    /// A `null` value means no payload.
    ///
    /// # Errors
    ///
    /// - [`EventError::MissingRequiredField`] for an empty mapping or a blank key
    /// - [`EventError::AmbiguousMetadata`] when more than one key is present
    /// - [`EventError::InvalidData`] when the value is neither an object nor null
    pub fn from_raw(map: Map<String, Value>) -> Result<Self> {
        if map.len() > 1 {
            return Err(EventError::AmbiguousMetadata(map.len()));
        }

        let Some((key, value)) = map.into_iter().next() else {
            return Err(EventError::MissingRequiredField("type"));
        };

        let builder = CustomEvent::builder().event_type(EventType::from(key));
        match value {
            Value::Null => builder.build(),
            Value::Object(data) => builder.data(data).build(),
            other => Err(EventError::InvalidData(format!(
                "raw event data must be an object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl TryFrom<Map<String, Value>> for CustomEvent {
    type Error = EventError;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        Self::from_raw(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom_event;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    struct Checkout {
        cart_id: &'static str,
    }

    impl Eventable for Checkout {
        fn to_event(&self) -> CustomEvent {
            custom_event!("checkout", "cart_id" => self.cart_id)
        }
    }

    #[test]
    fn test_raw_single_key_wraps() {
        let event = CustomEvent::from_raw(raw(json!({
            "payment_rejected": {"customer_id": "xiaus1934", "amount": 1900}
        })))
        .unwrap();

        assert_eq!(event.event_type(), &"payment_rejected");
        assert_eq!(
            event.to_json().unwrap(),
            json!({
                "type": "payment_rejected",
                "data": {"customer_id": "xiaus1934", "amount": 1900}
            })
        );
    }

    #[test]
    fn test_raw_null_value_has_no_data() {
        let event = CustomEvent::from_raw(raw(json!({"password_changed": null}))).unwrap();
        assert_eq!(event, CustomEvent::new("password_changed").unwrap());
    }

    #[test]
    fn test_raw_rejects_bad_shapes() {
        assert!(matches!(
            CustomEvent::from_raw(Map::new()),
            Err(EventError::MissingRequiredField("type"))
        ));
        assert!(matches!(
            CustomEvent::from_raw(raw(json!({"a": {}, "b": {}}))),
            Err(EventError::AmbiguousMetadata(2))
        ));
        assert!(matches!(
            CustomEvent::from_raw(raw(json!({"draft_saved": 42}))),
            Err(EventError::InvalidData(_))
        ));
        for blank in ["", "  "] {
            let mut map = Map::new();
            map.insert(blank.to_string(), json!({}));
            assert!(matches!(
                CustomEvent::from_raw(map),
                Err(EventError::MissingRequiredField("type"))
            ));
        }
    }

    #[test]
    fn test_resolve_each_variant() {
        let existing = CustomEvent::new("signed_out").unwrap();
        let checkout = Checkout { cart_id: "c-1" };

        let resolved = [
            EventMetadata::from(existing.clone()).resolve().unwrap(),
            EventMetadata::from(raw(json!({"signed_out": null}))).resolve().unwrap(),
            EventMetadata::from(&checkout).resolve().unwrap(),
        ];

        assert_eq!(resolved[0], existing);
        assert_eq!(resolved[1], existing);
        assert_eq!(resolved[2], checkout.to_event());
    }
}
