//! Configuration error types.

use starfield_core::StarfieldError;

/// Errors raised while loading, saving, or checking `starfield.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings directory or file could not be written.
    #[error("failed to write settings: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file is not valid RON for [`crate::Config`].
    #[error("failed to parse settings: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Serializing to RON failed.
    #[error("failed to serialize settings: {0}")]
    SerializeError(#[source] ron::Error),

    /// The file parsed but holds values the generator would reject.
    #[error(transparent)]
    Invalid(#[from] StarfieldError),
}
