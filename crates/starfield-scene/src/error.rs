//! Scene assembly and export errors.

use starfield_core::StarfieldError;
use thiserror::Error;

/// Errors returned while assembling or persisting a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Sampling or appearance construction failed; the scene is untouched.
    #[error(transparent)]
    Generation(#[from] StarfieldError),

    /// Collection names must not be empty.
    #[error("collection name must not be empty")]
    EmptyCollectionName,

    /// I/O error reading or writing a scene file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON serialization error.
    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
