/// Convenience result type used across rankrace.
pub type RaceResult<T> = Result<T, RaceError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only construction-time operations fail. Encoding, snapshotting, ranking and the
/// playhead tick are total and report missing data as absence instead.
#[derive(thiserror::Error, Debug)]
pub enum RaceError {
    /// Invalid user-provided data (era tables, pause dates, controller inputs).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or decoding an input record set.
    #[error("ingest error: {0}")]
    Ingest(String),

    /// Invalid playback configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaceError {
    /// Build a [`RaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RaceError::Ingest`] value.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// Build a [`RaceError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
