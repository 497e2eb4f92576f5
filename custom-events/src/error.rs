use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    /// A required event field was omitted or blank
    #[error("missing required field `{0}`")]
    MissingRequiredField(&'static str),

    /// Raw metadata carried more than one candidate event key
    #[error("raw event metadata must hold exactly one event key, found {0}")]
    AmbiguousMetadata(usize),

    #[error("invalid event data: {0}")]
    InvalidData(String),

    #[error("invalid event logger configuration: {0}")]
    InvalidConfig(String),

    /// Payload could not be encoded as JSON
    #[error("event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EventError>;
