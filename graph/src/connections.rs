//! Connection (edge) creation, edits, and deletion.
//!
//! Authorization for these mutations happens at the consuming boundary via
//! `is_same_family`; [`FamilyGraph::connection_scope`] exposes the owning
//! tree's family code so the boundary can make that check before calling in.

use crate::{FamilyGraph, GraphError};
use kinship_notify::NewNotification;
use kinship_store::{
    ConnectionRecord, ConnectionStore, Directory, FamilyTreeStore, NodeStore, StoreError,
};
use kinship_types::{
    ConnectionId, FamilyCode, MemberId, NodeId, NotificationKind, RelationshipType, Timestamp,
};

/// A connection about to be created.
#[derive(Clone, Debug)]
pub struct NewConnection {
    pub source_node: NodeId,
    pub target_node: NodeId,
    pub relationship_type: RelationshipType,
    pub relationship_label: String,
}

impl<D: Directory> FamilyGraph<D> {
    /// Create a directed, typed edge between two nodes of the same tree.
    ///
    /// Both endpoints must resolve to nodes of one tree; the relationship
    /// label must accompany the type.
    pub fn create_connection(
        &self,
        conn: NewConnection,
        actor: &MemberId,
    ) -> Result<ConnectionRecord, GraphError> {
        if conn.relationship_label.trim().is_empty() {
            return Err(GraphError::MissingRelationshipLabel);
        }
        let source = self
            .dir()
            .nodes()
            .get_node(&conn.source_node)?
            .ok_or_else(|| GraphError::NodeNotFound(conn.source_node.to_string()))?;
        let target = self
            .dir()
            .nodes()
            .get_node(&conn.target_node)?
            .ok_or_else(|| GraphError::NodeNotFound(conn.target_node.to_string()))?;
        if source.tree_id != target.tree_id {
            return Err(GraphError::CrossTreeConnection {
                source_node: source.id.to_string(),
                target_node: target.id.to_string(),
            });
        }

        let now = Timestamp::now();
        let record = ConnectionRecord {
            id: ConnectionId::generate(),
            tree_id: source.tree_id,
            source_node: conn.source_node,
            target_node: conn.target_node,
            relationship_type: conn.relationship_type,
            relationship_label: conn.relationship_label.trim().to_string(),
            created_by: actor.clone(),
            updated_by: actor.clone(),
            created_at: now,
            updated_at: now,
        };
        self.dir().connections().insert_connection(&record)?;

        self.audit().record_best_effort(
            actor,
            "connection.created",
            "connection",
            record.id.as_str(),
            None,
            serde_json::to_value(&record).ok(),
        );
        self.notify_endpoints(&record, actor, "A family connection was added");
        Ok(record)
    }

    /// The family code owning a connection — the datum the boundary needs
    /// for its `is_same_family` check.
    pub fn connection_scope(&self, id: &ConnectionId) -> Result<FamilyCode, GraphError> {
        let conn = self
            .dir()
            .connections()
            .get_connection(id)?
            .ok_or_else(|| GraphError::ConnectionNotFound(id.to_string()))?;
        let tree = self
            .dir()
            .trees()
            .get_tree(&conn.tree_id)?
            .ok_or_else(|| GraphError::TreeNotFound(conn.tree_id.to_string()))?;
        Ok(tree.family_code)
    }

    /// Re-type and re-label a connection. Attributed to `actor`.
    pub fn update_connection(
        &self,
        id: &ConnectionId,
        relationship_type: RelationshipType,
        relationship_label: &str,
        actor: &MemberId,
    ) -> Result<ConnectionRecord, GraphError> {
        if relationship_label.trim().is_empty() {
            return Err(GraphError::MissingRelationshipLabel);
        }
        let mut record = self
            .dir()
            .connections()
            .get_connection(id)?
            .ok_or_else(|| GraphError::ConnectionNotFound(id.to_string()))?;

        let before = serde_json::to_value(&record).ok();
        record.relationship_type = relationship_type;
        record.relationship_label = relationship_label.trim().to_string();
        record.updated_by = actor.clone();
        record.updated_at = Timestamp::now();
        self.dir().connections().put_connection(&record)?;

        self.audit().record_best_effort(
            actor,
            "connection.updated",
            "connection",
            record.id.as_str(),
            before,
            serde_json::to_value(&record).ok(),
        );
        self.notify_endpoints(&record, actor, "A family connection was updated");
        Ok(record)
    }

    /// Delete a connection. Attributed to `actor` in the audit trail.
    pub fn delete_connection(
        &self,
        id: &ConnectionId,
        actor: &MemberId,
    ) -> Result<(), GraphError> {
        let record = self
            .dir()
            .connections()
            .get_connection(id)?
            .ok_or_else(|| GraphError::ConnectionNotFound(id.to_string()))?;
        match self.dir().connections().delete_connection(id) {
            Ok(()) => {}
            // Raced with another delete; the edge is gone either way.
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        self.audit().record_best_effort(
            actor,
            "connection.deleted",
            "connection",
            record.id.as_str(),
            serde_json::to_value(&record).ok(),
            None,
        );
        self.notify_endpoints(&record, actor, "A family connection was removed");
        Ok(())
    }

    /// All connections within a tree, for rendering.
    pub fn connections_for_tree(
        &self,
        tree_id: &kinship_types::TreeId,
    ) -> Result<Vec<ConnectionRecord>, GraphError> {
        Ok(self.dir().connections().connections_by_tree(tree_id)?)
    }

    /// Best-effort `ConnectionChanged` notification to the members at both
    /// endpoints, skipping the actor.
    fn notify_endpoints(&self, record: &ConnectionRecord, actor: &MemberId, message: &str) {
        for node_id in [&record.source_node, &record.target_node] {
            let member = match self.dir().nodes().get_node(node_id) {
                Ok(Some(node)) => node.member_id,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(node = %node_id, error = %e, "skipping connection notification");
                    continue;
                }
            };
            if member == *actor {
                continue;
            }
            self.notifications().notify_best_effort(
                &member,
                NewNotification::new(NotificationKind::ConnectionChanged, "Family tree", message)
                    .with_payload(serde_json::json!({
                        "connection_id": record.id.as_str(),
                        "relationship": record.relationship_label,
                    })),
            );
        }
    }
}
