//! Family tree node storage trait.

use crate::StoreError;
use kinship_types::{MemberId, NodeId, NodeVisibility, Timestamp, TreeId};
use serde::{Deserialize, Serialize};

/// A member's presence and layout within one family tree.
///
/// Exactly one node exists per (tree, member) pair; the store enforces the
/// uniqueness constraint on insert.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub tree_id: TreeId,
    pub member_id: MemberId,
    /// 2-D layout position.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub visibility: NodeVisibility,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NodeRecord {
    pub const DEFAULT_WIDTH: f64 = 120.0;
    pub const DEFAULT_HEIGHT: f64 = 60.0;
    pub const DEFAULT_COLOR: &'static str = "#e8f0fe";

    /// A fresh node at the layout origin with default display metadata.
    pub fn new(tree_id: TreeId, member_id: MemberId, now: Timestamp) -> Self {
        Self {
            id: NodeId::generate(),
            tree_id,
            member_id,
            x: 0.0,
            y: 0.0,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            color: Self::DEFAULT_COLOR.to_string(),
            visibility: NodeVisibility::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Trait for node storage operations.
pub trait NodeStore {
    /// Insert a new node; `StoreError::Duplicate` when a node already exists
    /// for the (tree, member) pair. This constraint is the sole concurrency
    /// guard for concurrent node materialization.
    fn insert_node(&self, record: &NodeRecord) -> Result<(), StoreError>;
    fn get_node(&self, id: &NodeId) -> Result<Option<NodeRecord>, StoreError>;
    fn node_for_member(
        &self,
        tree_id: &TreeId,
        member_id: &MemberId,
    ) -> Result<Option<NodeRecord>, StoreError>;
    fn put_node(&self, record: &NodeRecord) -> Result<(), StoreError>;
    fn nodes_by_tree(&self, tree_id: &TreeId) -> Result<Vec<NodeRecord>, StoreError>;
    fn node_count(&self) -> Result<u64, StoreError>;
}
