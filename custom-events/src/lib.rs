//! Canonical custom log events
//!
//! Business occurrences (payment rejected, draft saved, password changed) are
//! normalized into one [`CustomEvent`] shape before they are encoded and
//! shipped to a log-processing backend.
//!
//! # Key Pieces
//!
//! - **CustomEvent**: a symbolic [`EventType`] plus an optional [`EventData`] payload
//! - **Eventable**: the "can produce a CustomEvent" capability
//! - **`#[derive(Eventable)]`**: generates the capability for a struct,
//!   capturing every field shallowly (enabled by the default `derive` feature)
//! - **EventMetadata**: resolves events, raw mappings and `Eventable` values uniformly
//! - **EventLogger**: emits converted events through `tracing`
//!
//! # Example
//!
//! ```rust
//! use custom_events::{Eventable, EventLogger};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Eventable)]
//! #[eventable(event_type = "payment_rejected")]
//! struct PaymentRejected {
//!     customer_id: String,
//!     amount: u64,
//!     currency: String,
//! }
//!
//! fn main() -> Result<(), custom_events::EventError> {
//!     let rejected = PaymentRejected {
//!         customer_id: "xiaus1934".to_string(),
//!         amount: 1900,
//!         currency: "USD".to_string(),
//!     };
//!
//!     let event = rejected.to_event();
//!     assert_eq!(
//!         event.to_json()?,
//!         serde_json::json!({
//!             "type": "payment_rejected",
//!             "data": {"customer_id": "xiaus1934", "amount": 1900, "currency": "USD"}
//!         })
//!     );
//!
//!     EventLogger::default().emit("Payment rejected", &rejected)?;
//!     Ok(())
//! }
//! ```

extern crate self as custom_events;

pub mod config;
pub mod error;
pub mod event;
pub mod event_data;
pub mod event_type;
pub mod eventable;
mod finite;
pub mod logging;
pub mod macros;
pub mod metadata;

pub use config::*;
pub use error::*;
pub use event::*;
pub use event_data::{EventData, FieldValue, TIME_MS_KEY};
pub use event_type::*;
pub use eventable::*;
pub use logging::EventLogger;
pub use metadata::*;

#[cfg(feature = "derive")]
pub use custom_events_macros::Eventable;

// Used by generated code and exported macros
pub use serde;
pub use serde_json;
pub use tracing;
