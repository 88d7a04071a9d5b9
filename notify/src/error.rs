use kinship_store::StoreError;
use kinship_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification not found: {0}")]
    NotFound(String),

    #[error("notification {0} does not belong to the caller")]
    Forbidden(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl NotifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Storage(StoreError::Timeout(_)) => ErrorKind::Timeout,
            Self::Storage(_) => ErrorKind::StoreUnavailable,
        }
    }
}
