//! Emission of custom events through `tracing`
//!
//! Every emitted record carries two fields: `event_type` (the tag) and
//! `event` (the encoded `{"type", "data"}` object). Encoding failures never
//! panic; they drop that one record, or are returned in strict mode.

use crate::config::EventLogConfig;
use crate::error::Result;
use crate::event::CustomEvent;
use crate::eventable::Eventable;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct EventLogger {
    enabled: bool,
    level: Level,
    strict: bool,
}

impl EventLogger {
    /// # Errors
    ///
    /// Fails when the configured level name is unknown.
    pub fn new(config: &EventLogConfig) -> Result<Self> {
        Ok(Self {
            enabled: config.enabled,
            level: config.level()?,
            strict: config.strict,
        })
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Convert `source` and emit it
    ///
    /// # Errors
    ///
    /// In strict mode, returns the encoding error for payloads without a JSON
    /// representation.
    pub fn emit<E: Eventable + ?Sized>(&self, message: &str, source: &E) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let event = source.to_event();
        if self.strict {
            let json = event.to_json_string()?;
            emit_at(self.level, message, &event, &json);
        } else {
            emit_lenient(self.level, message, &event);
        }
        Ok(())
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self {
            enabled: true,
            level: Level::INFO,
            strict: false,
        }
    }
}

/// One-off lenient emission, used by the `event_*!` macros
pub fn log_event<E: Eventable + ?Sized>(level: Level, message: &str, source: &E) {
    emit_lenient(level, message, &source.to_event());
}

/// Encoding failures become a warning and the event is dropped
fn emit_lenient(level: Level, message: &str, event: &CustomEvent) {
    match event.to_json_string() {
        Ok(json) => emit_at(level, message, event, &json),
        Err(err) => tracing::warn!(
            event_type = %event.event_type(),
            error = %err,
            "Dropping custom event that could not be encoded"
        ),
    }
}

fn emit_at(level: Level, message: &str, event: &CustomEvent, json: &str) {
    let event_type = event.event_type();
    match level {
        Level::ERROR => tracing::error!(event_type = %event_type, event = json, "{}", message),
        Level::WARN => tracing::warn!(event_type = %event_type, event = json, "{}", message),
        Level::INFO => tracing::info!(event_type = %event_type, event = json, "{}", message),
        Level::DEBUG => tracing::debug!(event_type = %event_type, event = json, "{}", message),
        _ => tracing::trace!(event_type = %event_type, event = json, "{}", message),
    }
}
