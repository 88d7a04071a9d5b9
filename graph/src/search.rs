//! Member search and selection projections over one tree.

use crate::{FamilyGraph, GraphError};
use kinship_store::{Directory, FamilyTreeStore, MemberRecord, MemberStore, NodeStore};
use kinship_types::{MemberId, NodeId, TreeId};
use serde::Serialize;

/// Optional, AND-combined search filters.
#[derive(Clone, Debug, Default)]
pub struct SearchFilters {
    /// Free text, matched case-insensitively against name fields.
    pub query: Option<String>,
    pub relationship: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
}

/// Lightweight projection for dropdown population.
#[derive(Clone, Debug, Serialize)]
pub struct MemberOption {
    pub member_id: MemberId,
    pub node_id: NodeId,
    /// Composed label; the root member reads `"<name> (Root Member)"`.
    pub display_name: String,
    pub is_root_member: bool,
}

fn opt_matches(filter: &Option<String>, value: &Option<String>) -> bool {
    match filter {
        None => true,
        Some(wanted) => value
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case(wanted)),
    }
}

fn query_matches(query: &Option<String>, member: &MemberRecord) -> bool {
    match query {
        None => true,
        Some(q) => {
            let q = q.to_lowercase();
            member.full_name.to_lowercase().contains(&q)
                || member.login_id.to_lowercase().contains(&q)
        }
    }
}

impl<D: Directory> FamilyGraph<D> {
    /// Search a tree's members. All filters optional and AND-combined; only
    /// members with a visible node are candidates, so a member who left the
    /// family never appears. Results are name-ordered; an unknown tree or no
    /// match yields an empty list, never an error.
    pub fn search_family_members(
        &self,
        tree_id: &TreeId,
        filters: &SearchFilters,
    ) -> Result<Vec<MemberRecord>, GraphError> {
        let mut results = Vec::new();
        for node in self.visible_nodes(tree_id)? {
            let Some(member) = self.dir().members().get_member(&node.member_id)? else {
                continue;
            };
            if query_matches(&filters.query, &member)
                && opt_matches(&filters.relationship, &member.relationship)
                && opt_matches(&filters.gender, &member.gender)
                && opt_matches(&filters.location, &member.location)
            {
                results.push(member);
            }
        }
        results.sort_by(|a, b| a.full_name.cmp(&b.full_name).then(a.id.cmp(&b.id)));
        Ok(results)
    }

    /// Projection of a tree's visible members for selection widgets.
    /// Empty (not an error) when the tree does not exist.
    pub fn members_for_selection(&self, tree_id: &TreeId) -> Result<Vec<MemberOption>, GraphError> {
        let Some(tree) = self.dir().trees().get_tree(tree_id)? else {
            return Ok(Vec::new());
        };

        let mut options = Vec::new();
        for node in self.visible_nodes(tree_id)? {
            let Some(member) = self.dir().members().get_member(&node.member_id)? else {
                continue;
            };
            let is_root_member = tree.root_member.as_ref() == Some(&member.id);
            let display_name = if is_root_member {
                format!("{} (Root Member)", member.full_name)
            } else {
                member.full_name.clone()
            };
            options.push(MemberOption {
                member_id: member.id,
                node_id: node.id,
                display_name,
                is_root_member,
            });
        }
        options.sort_by(|a, b| {
            b.is_root_member
                .cmp(&a.is_root_member)
                .then(a.display_name.cmp(&b.display_name))
        });
        Ok(options)
    }

    fn visible_nodes(
        &self,
        tree_id: &TreeId,
    ) -> Result<Vec<kinship_store::NodeRecord>, GraphError> {
        Ok(self
            .dir()
            .nodes()
            .nodes_by_tree(tree_id)?
            .into_iter()
            .filter(|n| n.visibility.is_visible())
            .collect())
    }
}
