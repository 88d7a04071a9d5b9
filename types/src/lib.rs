//! Fundamental types for Kinship.
//!
//! The vocabulary every other crate in the workspace builds on: entity ids,
//! family codes, timestamps, state enums, and the shared error taxonomy.

pub mod error;
pub mod family_code;
pub mod id;
pub mod state;
pub mod time;

pub use error::ErrorKind;
pub use family_code::{FamilyCode, FamilyCodeError};
pub use id::{AuditId, ConnectionId, DocumentId, MemberId, NodeId, NotificationId, TreeId};
pub use state::{
    DocumentType, NodeVisibility, NotificationKind, NotificationPriority, RelationshipType, Role,
    VerificationStatus,
};
pub use time::Timestamp;
