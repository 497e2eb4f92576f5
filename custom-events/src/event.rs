use crate::error::{EventError, Result};
use crate::event_data::EventData;
use crate::event_type::EventType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical application-specific log event
///
/// Encodes as `{"type": "...", "data": {...}}` with `data` omitted when the
/// event carries no payload. Values are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CustomEventFields")]
pub struct CustomEvent {
    #[serde(rename = "type")]
    event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<EventData>,
}

impl CustomEvent {
    /// Event without payload
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingRequiredField`] for a blank type.
    pub fn new(event_type: impl Into<EventType>) -> Result<Self> {
        Self::builder().event_type(event_type).build()
    }

    /// # Errors
    ///
    /// Returns [`EventError::MissingRequiredField`] for a blank type.
    pub fn with_data(
        event_type: impl Into<EventType>,
        data: impl Into<EventData>,
    ) -> Result<Self> {
        Self::builder().event_type(event_type).data(data).build()
    }

    /// Construction for tags already checked at compile time
    ///
    /// Used by `#[derive(Eventable)]` and `custom_event!`, which only accept
    /// non-blank string literals.
    #[doc(hidden)]
    pub fn from_checked_parts(event_type: EventType, data: Option<EventData>) -> Self {
        debug_assert!(!event_type.is_blank());
        Self { event_type, data }
    }

    /// Fallible construction from loose `{type, data}` parts
    pub fn builder() -> CustomEventBuilder {
        CustomEventBuilder::default()
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn data(&self) -> Option<&EventData> {
        self.data.as_ref()
    }

    pub fn time_ms(&self) -> Option<f64> {
        self.data.as_ref().and_then(EventData::time_ms)
    }

    pub fn into_parts(self) -> (EventType, Option<EventData>) {
        (self.event_type, self.data)
    }

    /// Encode for the log backend
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Serialization`] when a payload field has no JSON
    /// representation.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// # Errors
    ///
    /// Same as [`CustomEvent::to_json`].
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builder enforcing the required `type` field
#[derive(Debug, Default, Clone)]
pub struct CustomEventBuilder {
    event_type: Option<EventType>,
    data: Option<EventData>,
}

impl CustomEventBuilder {
    #[must_use]
    pub fn event_type(mut self, event_type: impl Into<EventType>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    #[must_use]
    pub fn data(mut self, data: impl Into<EventData>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// # Errors
    ///
    /// Returns [`EventError::MissingRequiredField`] when no type, or a blank
    /// one, was supplied.
    pub fn build(self) -> Result<CustomEvent> {
        let event_type = self
            .event_type
            .filter(|event_type| !event_type.is_blank())
            .ok_or(EventError::MissingRequiredField("type"))?;

        Ok(CustomEvent {
            event_type,
            data: self.data,
        })
    }
}

/// Wire shape before the required-field check
#[derive(Deserialize)]
struct CustomEventFields {
    #[serde(rename = "type", default)]
    event_type: Option<EventType>,
    #[serde(default)]
    data: Option<EventData>,
}

impl TryFrom<CustomEventFields> for CustomEvent {
    type Error = EventError;

    fn try_from(fields: CustomEventFields) -> Result<Self> {
        CustomEventBuilder {
            event_type: fields.event_type,
            data: fields.data,
        }
        .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_requires_type() {
        let err = CustomEvent::builder()
            .data(EventData::new().with("draft_id", 42))
            .build()
            .unwrap_err();
        assert!(matches!(err, EventError::MissingRequiredField("type")));

        let err = CustomEvent::builder().event_type("").build().unwrap_err();
        assert!(matches!(err, EventError::MissingRequiredField("type")));
    }

    #[test]
    fn test_constructors_share_blank_rule() {
        for blank in ["", " ", "\t\n"] {
            assert!(matches!(
                CustomEvent::new(blank),
                Err(EventError::MissingRequiredField("type"))
            ));
            assert!(matches!(
                CustomEvent::with_data(blank, EventData::new().with("draft_id", 1)),
                Err(EventError::MissingRequiredField("type"))
            ));
            assert!(serde_json::from_value::<CustomEvent>(json!({"type": blank})).is_err());
        }
    }

    #[test]
    fn test_type_only_has_no_data() {
        let event = CustomEvent::builder()
            .event_type("password_changed")
            .build()
            .unwrap();

        assert_eq!(event.event_type(), &EventType::from("password_changed"));
        assert!(event.data().is_none());
        assert_eq!(event, CustomEvent::new("password_changed").unwrap());
    }

    #[test]
    fn test_encodes_type_and_optional_data() {
        let bare = CustomEvent::new("password_changed").unwrap();
        assert_eq!(bare.to_json().unwrap(), json!({"type": "password_changed"}));

        let event = CustomEvent::with_data(
            "payment_rejected",
            EventData::new().with("amount", 1900).with_time_ms(12.5),
        )
        .unwrap();
        assert_eq!(
            event.to_json().unwrap(),
            json!({"type": "payment_rejected", "data": {"amount": 1900, "time_ms": 12.5}})
        );
        assert_eq!(event.time_ms(), Some(12.5));
    }

    #[test]
    fn test_encoded_events_decode() {
        let event =
            CustomEvent::with_data("draft_saved", EventData::new().with("draft_id", 7)).unwrap();

        let decoded: CustomEvent = serde_json::from_value(event.to_json().unwrap()).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_decoding_checks_required_type() {
        let event: CustomEvent =
            serde_json::from_value(json!({"type": "draft_saved", "data": {"draft_id": 7}}))
                .unwrap();
        assert_eq!(event.event_type(), &"draft_saved");
        assert_eq!(
            event.data().and_then(|data| data.get_json("draft_id")),
            Some(&json!(7))
        );

        let err = serde_json::from_value::<CustomEvent>(json!({"data": {}})).unwrap_err();
        assert!(err.to_string().contains("missing required field `type`"));
    }

    #[test]
    fn test_structural_equality() {
        let nested = json!({"c": [1, 2]});
        let a = EventData::new().with("a", 1).with("b", nested.clone());
        let b = EventData::new().with("b", nested).with("a", 1);
        let c = EventData::new().with("a", 2);

        let a = CustomEvent::with_data("x", a).unwrap();
        let b = CustomEvent::with_data("x", b).unwrap();
        let c = CustomEvent::with_data("x", c).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, CustomEvent::new("x").unwrap());
    }
}
