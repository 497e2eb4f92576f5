use crate::event::CustomEvent;
use std::rc::Rc;
use std::sync::Arc;

/// Types that can be normalized into a [`CustomEvent`]
///
/// Implementations must be pure and total: converting the same value twice
/// yields equal events, and every well-formed value converts. Payload values
/// without a JSON form are carried along and only rejected when the event is
/// encoded.
///
/// Usually derived:
///
/// ```rust
/// use custom_events::{Eventable, EventType};
/// use serde::Serialize;
///
/// #[derive(Serialize, Eventable)]
/// #[eventable(event_type = "payment_rejected")]
/// struct PaymentRejected {
///     customer_id: String,
///     amount: u64,
///     currency: String,
/// }
///
/// let event = PaymentRejected {
///     customer_id: "xiaus1934".into(),
///     amount: 1900,
///     currency: "USD".into(),
/// }
/// .to_event();
///
/// assert_eq!(event.event_type(), &EventType::from("payment_rejected"));
/// ```
pub trait Eventable {
    fn to_event(&self) -> CustomEvent;
}

impl Eventable for CustomEvent {
    fn to_event(&self) -> CustomEvent {
        self.clone()
    }
}

impl<T: Eventable + ?Sized> Eventable for &T {
    fn to_event(&self) -> CustomEvent {
        (**self).to_event()
    }
}

impl<T: Eventable + ?Sized> Eventable for Box<T> {
    fn to_event(&self) -> CustomEvent {
        (**self).to_event()
    }
}

impl<T: Eventable + ?Sized> Eventable for Rc<T> {
    fn to_event(&self) -> CustomEvent {
        (**self).to_event()
    }
}

impl<T: Eventable + ?Sized> Eventable for Arc<T> {
    fn to_event(&self) -> CustomEvent {
        (**self).to_event()
    }
}
