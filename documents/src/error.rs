use kinship_store::StoreError;
use kinship_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("missing or malformed field: {0}")]
    InvalidInput(String),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("bound family member node not found: {0}")]
    NodeNotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl DocumentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) | Self::NodeNotFound(_) => ErrorKind::NotFound,
            Self::Storage(StoreError::Timeout(_)) => ErrorKind::Timeout,
            Self::Storage(_) => ErrorKind::StoreUnavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_discriminate_failures() {
        assert_eq!(
            DocumentError::InvalidInput("title".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(DocumentError::NotFound("doc_x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            DocumentError::NodeNotFound("node_x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DocumentError::Storage(StoreError::Backend("down".into())).kind(),
            ErrorKind::StoreUnavailable
        );

        let timeout = DocumentError::Storage(StoreError::Timeout("deadline".into())).kind();
        assert_eq!(timeout, ErrorKind::Timeout);
        assert!(timeout.is_retryable());
    }
}
