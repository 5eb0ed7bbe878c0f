//! Error types shared by the sampler and the appearance builder.

/// Failures raised by the generation core.
///
/// Both variants are recoverable. The core never hands back partial output
/// alongside an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StarfieldError {
    /// An input parameter is outside its legal domain.
    #[error("invalid starfield configuration: {0}")]
    InvalidConfig(String),

    /// The caller requested an abort before generation finished.
    #[error("starfield generation was cancelled")]
    Cancelled,
}

impl StarfieldError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}
