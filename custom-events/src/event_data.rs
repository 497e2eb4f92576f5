use crate::error::EventError;
use crate::finite;
use serde::ser::{Error as _, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::time::Duration;

/// Recognized duration key, fractional milliseconds
pub const TIME_MS_KEY: &str = "time_ms";

/// One payload field
///
/// `Unrepresentable` records a field whose source value had no JSON form.
/// Capturing it never fails; encoding the event does.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Json(Value),
    Unrepresentable { reason: String },
}

impl FieldValue {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Unrepresentable { .. } => None,
        }
    }

    pub fn is_representable(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl PartialEq<Value> for FieldValue {
    fn eq(&self, other: &Value) -> bool {
        self.as_json() == Some(other)
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Json(value) => value.serialize(serializer),
            Self::Unrepresentable { reason } => Err(S::Error::custom(format!(
                "value has no JSON representation: {reason}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::Json)
    }
}

/// Payload of a custom event, keyed by field name
///
/// Keys are kept sorted, so two payloads with the same entries compare equal
/// regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct EventData(BTreeMap<String, FieldValue>);

impl EventData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned form of [`EventData::insert_field`]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) {
        self.insert_field(key, &value);
    }

    /// Capture a field verbatim through its `Serialize` impl
    ///
    /// Values without a JSON form, including NaN and infinite floats, are kept
    /// as [`FieldValue::Unrepresentable`] and reported when the event is encoded.
    pub fn insert_field<T>(&mut self, key: impl Into<String>, value: &T)
    where
        T: Serialize + ?Sized,
    {
        self.0.insert(key.into(), capture(value));
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_time_ms(self, time_ms: f64) -> Self {
        self.with(TIME_MS_KEY, time_ms)
    }

    #[must_use]
    pub fn with_elapsed(self, elapsed: Duration) -> Self {
        self.with_time_ms(elapsed.as_secs_f64() * 1000.0)
    }

    pub fn time_ms(&self) -> Option<f64> {
        self.get_json(TIME_MS_KEY).and_then(Value::as_f64)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn get_json(&self, key: &str) -> Option<&Value> {
        self.0.get(key).and_then(FieldValue::as_json)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.0.iter()
    }

    pub fn is_representable(&self) -> bool {
        self.0.values().all(FieldValue::is_representable)
    }
}

impl Serialize for EventData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            match value {
                FieldValue::Json(json) => map.serialize_entry(key, json)?,
                FieldValue::Unrepresentable { reason } => {
                    return Err(S::Error::custom(format!(
                        "field `{key}` has no JSON representation: {reason}"
                    )))
                }
            }
        }
        map.end()
    }
}

impl From<Map<String, Value>> for EventData {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl TryFrom<Value> for EventData {
    type Error = EventError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            other => Err(EventError::InvalidData(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for EventData
where
    K: Into<String>,
    V: Serialize,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), capture(&value)))
                .collect(),
        )
    }
}

// serde_json maps non-finite floats to null, so they are screened first
fn capture<T: Serialize + ?Sized>(value: &T) -> FieldValue {
    let json = finite::check(value)
        .map_err(|err| err.to_string())
        .and_then(|()| serde_json::to_value(value).map_err(|err| err.to_string()));

    match json {
        Ok(json) => FieldValue::Json(json),
        Err(reason) => FieldValue::Unrepresentable { reason },
    }
}

impl IntoIterator for EventData {
    type Item = (String, FieldValue);
    type IntoIter = btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventData {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
