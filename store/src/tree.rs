//! Family tree storage trait.

use crate::StoreError;
use kinship_types::{FamilyCode, MemberId, Timestamp, TreeId};
use serde::{Deserialize, Serialize};

/// One family tree per family code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FamilyTreeRecord {
    pub id: TreeId,
    pub name: String,
    /// Globally unique, case-normalized, immutable after creation.
    pub family_code: FamilyCode,
    /// The anchor/originator of this tree, if designated.
    pub root_member: Option<MemberId>,
    /// Deactivated (never hard-deleted) when the family empties out.
    pub active: bool,
    /// Denormalized projection of the visible node set. Rebuildable on demand;
    /// never the sole source of truth for membership.
    pub member_ids: Vec<MemberId>,
    pub member_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for family tree storage operations.
pub trait FamilyTreeStore {
    /// Insert a new tree; `StoreError::Duplicate` when a tree already exists
    /// for the family code.
    fn insert_tree(&self, record: &FamilyTreeRecord) -> Result<(), StoreError>;
    fn get_tree(&self, id: &TreeId) -> Result<Option<FamilyTreeRecord>, StoreError>;
    fn tree_by_code(&self, code: &FamilyCode) -> Result<Option<FamilyTreeRecord>, StoreError>;
    fn put_tree(&self, record: &FamilyTreeRecord) -> Result<(), StoreError>;
    fn iter_trees(&self) -> Result<Vec<FamilyTreeRecord>, StoreError>;

    fn tree_count(&self) -> Result<u64, StoreError> {
        self.iter_trees().map(|v| v.len() as u64)
    }
}
