//! Family tree creation, lookup, root designation, and the denormalized
//! member-array cache.

use crate::{FamilyGraph, GraphError};
use kinship_store::{Directory, FamilyTreeRecord, FamilyTreeStore, MemberStore, NodeStore};
use kinship_types::{FamilyCode, MemberId, Timestamp, TreeId};
use serde::Serialize;

/// One row of the admin family listing.
#[derive(Clone, Debug, Serialize)]
pub struct FamilySummary {
    pub tree_id: TreeId,
    pub name: String,
    pub family_code: FamilyCode,
    pub member_count: u32,
    pub active: bool,
    pub root_member: Option<MemberId>,
}

impl<D: Directory> FamilyGraph<D> {
    /// Create a tree for a new family code.
    ///
    /// `Conflict` when a tree already exists for the code; the code is
    /// immutable afterwards.
    pub fn create_family_tree(
        &self,
        name: &str,
        code: FamilyCode,
    ) -> Result<FamilyTreeRecord, GraphError> {
        let now = Timestamp::now();
        let record = FamilyTreeRecord {
            id: TreeId::generate(),
            name: name.trim().to_string(),
            family_code: code.clone(),
            root_member: None,
            active: true,
            member_ids: Vec::new(),
            member_count: 0,
            created_at: now,
            updated_at: now,
        };
        match self.dir().trees().insert_tree(&record) {
            Ok(()) => Ok(record),
            Err(e) if e.is_duplicate() => Err(GraphError::DuplicateFamilyCode(code)),
            Err(e) => Err(e.into()),
        }
    }

    /// Case-insensitive exact lookup; absence is data, not an error.
    /// (`FamilyCode` is normalized at parse, so equality is already
    /// case-insensitive.)
    pub fn tree_by_code(&self, code: &FamilyCode) -> Result<Option<FamilyTreeRecord>, GraphError> {
        Ok(self.dir().trees().tree_by_code(code)?)
    }

    /// Designate a tree's root member. The member must hold a node in the
    /// tree and be verified.
    pub fn designate_root(
        &self,
        code: &FamilyCode,
        member_id: &MemberId,
    ) -> Result<FamilyTreeRecord, GraphError> {
        let mut tree = self
            .tree_by_code(code)?
            .ok_or_else(|| GraphError::TreeNotFound(code.to_string()))?;

        let member = self
            .dir()
            .members()
            .get_member(member_id)?
            .ok_or_else(|| GraphError::RootNotEligible(member_id.to_string()))?;
        if !member.status.is_publicly_visible() {
            return Err(GraphError::RootNotEligible(member_id.to_string()));
        }
        let node = self.dir().nodes().node_for_member(&tree.id, member_id)?;
        if !node.is_some_and(|n| n.visibility.is_visible()) {
            return Err(GraphError::RootNotEligible(member_id.to_string()));
        }

        tree.root_member = Some(member_id.clone());
        tree.updated_at = Timestamp::now();
        self.dir().trees().put_tree(&tree)?;
        Ok(tree)
    }

    /// Recompute and persist the denormalized member-id cache from the
    /// authoritative node set. A tree with no visible nodes is deactivated;
    /// one that regains members is reactivated. Pure projection — safe to run
    /// repeatedly.
    pub fn update_family_member_arrays(
        &self,
        code: &FamilyCode,
    ) -> Result<FamilyTreeRecord, GraphError> {
        let mut tree = self
            .tree_by_code(code)?
            .ok_or_else(|| GraphError::TreeNotFound(code.to_string()))?;

        let mut member_ids: Vec<MemberId> = self
            .dir()
            .nodes()
            .nodes_by_tree(&tree.id)?
            .into_iter()
            .filter(|n| n.visibility.is_visible())
            .map(|n| n.member_id)
            .collect();
        member_ids.sort();

        // The root must belong to the tree; a root who left loses the seat.
        if tree
            .root_member
            .as_ref()
            .is_some_and(|r| !member_ids.contains(r))
        {
            tree.root_member = None;
        }

        tree.member_count = member_ids.len() as u32;
        tree.active = !member_ids.is_empty();
        tree.member_ids = member_ids;
        tree.updated_at = Timestamp::now();
        self.dir().trees().put_tree(&tree)?;
        Ok(tree)
    }

    /// Bulk maintenance sweep: rebuild the member-array cache of every tree.
    /// Returns how many trees were swept; per-tree failures are logged and
    /// skipped so one bad tree cannot stall the sweep.
    pub fn sweep_member_arrays(&self) -> Result<u32, GraphError> {
        let mut swept = 0;
        for tree in self.dir().trees().iter_trees()? {
            match self.update_family_member_arrays(&tree.family_code) {
                Ok(_) => swept += 1,
                Err(e) => {
                    tracing::warn!(family = %tree.family_code, error = %e, "member array sweep skipped tree");
                }
            }
        }
        Ok(swept)
    }

    /// Admin-only enumeration of every family with member counts. The
    /// boundary applies `require_admin` before calling.
    pub fn list_families(&self) -> Result<Vec<FamilySummary>, GraphError> {
        let mut rows: Vec<FamilySummary> = self
            .dir()
            .trees()
            .iter_trees()?
            .into_iter()
            .map(|t| FamilySummary {
                tree_id: t.id,
                name: t.name,
                family_code: t.family_code,
                member_count: t.member_count,
                active: t.active,
                root_member: t.root_member,
            })
            .collect();
        rows.sort_by(|a, b| a.family_code.cmp(&b.family_code));
        Ok(rows)
    }
}
