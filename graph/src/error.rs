use kinship_store::StoreError;
use kinship_types::{ErrorKind, FamilyCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no family tree for code {0}")]
    TreeNotFound(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("a family tree already exists for code {0}")]
    DuplicateFamilyCode(FamilyCode),

    #[error("nodes {source_node} and {target_node} belong to different family trees")]
    CrossTreeConnection {
        source_node: String,
        target_node: String,
    },

    #[error("relationship type and label must both be present")]
    MissingRelationshipLabel,

    #[error("member {0} is not eligible to be the tree root")]
    RootNotEligible(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TreeNotFound(_) | Self::NodeNotFound(_) | Self::ConnectionNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::DuplicateFamilyCode(_) => ErrorKind::Conflict,
            Self::CrossTreeConnection { .. }
            | Self::MissingRelationshipLabel
            | Self::RootNotEligible(_) => ErrorKind::InvalidInput,
            Self::Storage(StoreError::Timeout(_)) => ErrorKind::Timeout,
            Self::Storage(_) => ErrorKind::StoreUnavailable,
        }
    }
}
