//! Connection (edge) storage trait.

use crate::StoreError;
use kinship_types::{ConnectionId, MemberId, NodeId, RelationshipType, Timestamp, TreeId};
use serde::{Deserialize, Serialize};

/// A directed, typed relationship between two nodes of the same tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: ConnectionId,
    /// The tree owning both endpoints.
    pub tree_id: TreeId,
    pub source_node: NodeId,
    pub target_node: NodeId,
    pub relationship_type: RelationshipType,
    /// Human-readable label; always present alongside the type.
    pub relationship_label: String,
    pub created_by: MemberId,
    /// Last member to edit this connection.
    pub updated_by: MemberId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for connection storage operations.
pub trait ConnectionStore {
    fn insert_connection(&self, record: &ConnectionRecord) -> Result<(), StoreError>;
    fn get_connection(&self, id: &ConnectionId) -> Result<Option<ConnectionRecord>, StoreError>;
    fn put_connection(&self, record: &ConnectionRecord) -> Result<(), StoreError>;
    /// Delete a connection; `StoreError::NotFound` when absent.
    fn delete_connection(&self, id: &ConnectionId) -> Result<(), StoreError>;
    fn connections_by_tree(&self, tree_id: &TreeId) -> Result<Vec<ConnectionRecord>, StoreError>;
    fn connection_count(&self) -> Result<u64, StoreError>;
}
