//! Node materialization, layout edits, and visibility toggles.

use crate::{FamilyGraph, GraphError};
use kinship_notify::NewNotification;
use kinship_store::{Directory, MemberStore, NodeRecord, NodeStore};
use kinship_types::{
    FamilyCode, MemberId, NodeId, NodeVisibility, NotificationKind, Timestamp,
};

/// Outcome of one `ensure_nodes_for_family` pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnsureReport {
    /// Nodes newly created this pass.
    pub created: u32,
    /// Nodes already present (including any revived from `Hidden`).
    pub existing: u32,
}

/// Layout fields a member may edit on their tree.
#[derive(Clone, Debug)]
pub struct NodeLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl<D: Directory> FamilyGraph<D> {
    /// Materialize a node for every member currently bound to `code`,
    /// skipping members whose node already exists.
    ///
    /// Idempotent and safe to run concurrently for the same family: the
    /// (tree, member) uniqueness constraint is the sole concurrency guard,
    /// and the losing writer of a duplicate-insert race counts the node as
    /// already present rather than failing. Hidden nodes of members still
    /// bound to the family are flipped back to visible (rejoin).
    pub fn ensure_nodes_for_family(&self, code: &FamilyCode) -> Result<EnsureReport, GraphError> {
        let tree = self
            .tree_by_code(code)?
            .ok_or_else(|| GraphError::TreeNotFound(code.to_string()))?;

        let mut report = EnsureReport::default();
        let now = Timestamp::now();

        for member in self.dir().members().members_by_family(code)? {
            match self.dir().nodes().node_for_member(&tree.id, &member.id)? {
                Some(mut node) => {
                    if node.visibility == NodeVisibility::Hidden {
                        node.visibility = NodeVisibility::Active;
                        node.updated_at = now;
                        self.dir().nodes().put_node(&node)?;
                    }
                    report.existing += 1;
                }
                None => {
                    let node = NodeRecord::new(tree.id.clone(), member.id.clone(), now);
                    match self.dir().nodes().insert_node(&node) {
                        Ok(()) => {
                            report.created += 1;
                            self.announce_member(&tree.root_member, &member.id, code);
                        }
                        // A concurrent ensure won the race; the node exists.
                        Err(e) if e.is_duplicate() => report.existing += 1,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }

        self.update_family_member_arrays(code)?;
        Ok(report)
    }

    /// Best-effort `MemberAdded` notification to the tree root.
    fn announce_member(&self, root: &Option<MemberId>, member_id: &MemberId, code: &FamilyCode) {
        let Some(root) = root else { return };
        if root == member_id {
            return;
        }
        self.notifications().notify_best_effort(
            root,
            NewNotification::new(
                NotificationKind::MemberAdded,
                "New family member",
                format!("A new member joined family {code}"),
            )
            .with_payload(serde_json::json!({
                "member_id": member_id.as_str(),
                "family_code": code.as_str(),
            })),
        );
    }

    /// Apply a layout edit to a node.
    pub fn set_node_layout(
        &self,
        node_id: &NodeId,
        layout: NodeLayout,
    ) -> Result<NodeRecord, GraphError> {
        let mut node = self
            .dir()
            .nodes()
            .get_node(node_id)?
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        node.x = layout.x;
        node.y = layout.y;
        node.width = layout.width;
        node.height = layout.height;
        node.color = layout.color;
        node.updated_at = Timestamp::now();
        self.dir().nodes().put_node(&node)?;
        Ok(node)
    }

    /// Hide a member's node when they leave the family. The node (and the
    /// connection history hanging off it) survives.
    pub fn hide_member_node(
        &self,
        code: &FamilyCode,
        member_id: &MemberId,
    ) -> Result<(), GraphError> {
        self.set_member_node_visibility(code, member_id, NodeVisibility::Hidden)
    }

    /// Make a returning member's node visible again.
    pub fn reveal_member_node(
        &self,
        code: &FamilyCode,
        member_id: &MemberId,
    ) -> Result<(), GraphError> {
        self.set_member_node_visibility(code, member_id, NodeVisibility::Active)
    }

    fn set_member_node_visibility(
        &self,
        code: &FamilyCode,
        member_id: &MemberId,
        visibility: NodeVisibility,
    ) -> Result<(), GraphError> {
        let tree = self
            .tree_by_code(code)?
            .ok_or_else(|| GraphError::TreeNotFound(code.to_string()))?;
        let mut node = self
            .dir()
            .nodes()
            .node_for_member(&tree.id, member_id)?
            .ok_or_else(|| GraphError::NodeNotFound(member_id.to_string()))?;
        if node.visibility != visibility {
            node.visibility = visibility;
            node.updated_at = Timestamp::now();
            self.dir().nodes().put_node(&node)?;
        }
        Ok(())
    }
}
