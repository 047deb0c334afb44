use thiserror::Error;

/// Result type for storage backend operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Caller-visible failures of the link registry.
///
/// Every variant is terminal: the registry never retries on behalf of the
/// caller, and a failed operation leaves no trace in either store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortcodeFormat(String),
    #[error("short code already in use: {0}")]
    ShortcodeCollision(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("short link has expired: {0}")]
    Expired(String),
    #[error("could not generate a free short code after {0} attempts")]
    GenerationExhausted(u32),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for RegistryError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::ShortcodeCollision(code),
            other => Self::Storage(other.to_string()),
        }
    }
}
