use kinship_store::StoreError;
use kinship_types::{ErrorKind, VerificationStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid login id or password")]
    InvalidCredential,

    #[error("account is {0}, not verified")]
    AccountNotVerified(VerificationStatus),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("login id or email already registered")]
    AlreadyRegistered,

    #[error("member {0} does not belong to a family")]
    NotInFamily(String),

    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition {
        from: VerificationStatus,
        to: VerificationStatus,
    },

    #[error("missing or malformed field: {0}")]
    InvalidInput(String),

    #[error("graph error: {0}")]
    Graph(#[from] kinship_graph::GraphError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCredential | Self::AccountNotVerified(_) => ErrorKind::Unauthenticated,
            Self::MemberNotFound(_) => ErrorKind::NotFound,
            Self::AlreadyRegistered => ErrorKind::Conflict,
            Self::NotInFamily(_) => ErrorKind::InvalidInput,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Graph(e) => e.kind(),
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
            RegistryError::InvalidCredential.kind(),
            ErrorKind::Unauthenticated
        );
        assert_eq!(
            RegistryError::AccountNotVerified(VerificationStatus::Pending).kind(),
            ErrorKind::Unauthenticated
        );
        assert_eq!(RegistryError::AlreadyRegistered.kind(), ErrorKind::Conflict);
        assert_eq!(
            RegistryError::InvalidTransition {
                from: VerificationStatus::Verified,
                to: VerificationStatus::Pending,
            }
            .kind(),
            ErrorKind::InvalidTransition
        );
        // Wrapped graph errors keep their own classification.
        assert_eq!(
            RegistryError::Graph(kinship_graph::GraphError::TreeNotFound("FAM123".into())).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn store_timeout_surfaces_retryable() {
        let kind = RegistryError::Storage(StoreError::Timeout("deadline".into())).kind();
        assert_eq!(kind, ErrorKind::Timeout);
        assert!(kind.is_retryable());
    }
}
