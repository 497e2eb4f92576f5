// Event logger configuration
use crate::error::{EventError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventLogConfig {
    pub enabled: bool,
    pub log_level: String,
    /// Return encoding failures to the caller instead of dropping the event
    pub strict: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
            strict: false,
        }
    }
}

impl EventLogConfig {
    /// # Errors
    ///
    /// Returns [`EventError::InvalidConfig`] for an unknown level name.
    pub fn level(&self) -> Result<Level> {
        Level::from_str(self.log_level.trim()).map_err(|_| {
            EventError::InvalidConfig(format!("unknown log level `{}`", self.log_level))
        })
    }
}
