use thiserror::Error;

/// Top-level error type for the Folio backend.
///
/// Only request-level faults travel through this type. Content-level
/// conditions such as an unknown terminal command are ordinary output.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the fault was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Other(_))
    }
}

pub type FolioResult<T> = std::result::Result<T, FolioError>;
