//! Abstract storage traits for Kinship.
//!
//! The underlying store is assumed to provide per-document atomic writes and
//! indexed lookups; every backend (in-memory for now) implements these traits.
//! The rest of the workspace depends only on the traits.

pub mod audit;
pub mod connection;
pub mod document;
pub mod error;
pub mod member;
pub mod node;
pub mod notification;
pub mod tree;

pub use audit::{AuditRecord, AuditStore};
pub use connection::{ConnectionRecord, ConnectionStore};
pub use document::{DocumentRecord, DocumentStore};
pub use error::StoreError;
pub use member::{MemberRecord, MemberStore};
pub use node::{NodeRecord, NodeStore};
pub use notification::{NotificationRecord, NotificationStore};
pub use tree::{FamilyTreeRecord, FamilyTreeStore};

/// Unified directory interface providing access to every collection.
///
/// Implementors expose the per-collection stores; higher-level services
/// coordinate across them.
pub trait Directory {
    type Members: MemberStore;
    type Trees: FamilyTreeStore;
    type Nodes: NodeStore;
    type Connections: ConnectionStore;
    type Notifications: NotificationStore;
    type Documents: DocumentStore;
    type Audit: AuditStore;

    fn members(&self) -> &Self::Members;
    fn trees(&self) -> &Self::Trees;
    fn nodes(&self) -> &Self::Nodes;
    fn connections(&self) -> &Self::Connections;
    fn notifications(&self) -> &Self::Notifications;
    fn documents(&self) -> &Self::Documents;
    fn audit(&self) -> &Self::Audit;

    /// Directory summary statistics.
    fn summary(&self) -> Result<DirectorySummary, StoreError> {
        Ok(DirectorySummary {
            members: self.members().member_count()?,
            trees: self.trees().tree_count()?,
            nodes: self.nodes().node_count()?,
            connections: self.connections().connection_count()?,
        })
    }
}

/// Summary statistics across collections.
#[derive(Clone, Debug)]
pub struct DirectorySummary {
    pub members: u64,
    pub trees: u64,
    pub nodes: u64,
    pub connections: u64,
}
