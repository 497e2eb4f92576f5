use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Symbolic `type` of a custom event
///
/// Tags are durable external identifiers (dashboards and alerts key on them),
/// so they are usually declared once as constants:
///
/// ```rust
/// use custom_events::EventType;
///
/// pub const PAYMENT_REJECTED: EventType = EventType::from_static("payment_rejected");
/// assert_eq!(PAYMENT_REJECTED, "payment_rejected");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(Cow<'static, str>);

impl EventType {
    /// Tag backed by a static string, usable in `const` items
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank tags count as missing, see [`is_blank_tag`]
    pub fn is_blank(&self) -> bool {
        is_blank_tag(&self.0)
    }
}

/// Empty or ASCII-whitespace-only
///
/// `const` so `custom_event!` can reject blank literals at compile time.
pub const fn is_blank_tag(tag: &str) -> bool {
    let mut bytes = tag.as_bytes();
    while let [first, rest @ ..] = bytes {
        if !first.is_ascii_whitespace() {
            return false;
        }
        bytes = rest;
    }
    true
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for EventType {
    fn from(tag: &'static str) -> Self {
        Self::from_static(tag)
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}

impl From<Cow<'static, str>> for EventType {
    fn from(tag: Cow<'static, str>) -> Self {
        Self(tag)
    }
}

impl PartialEq<str> for EventType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EventType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for EventType {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}
