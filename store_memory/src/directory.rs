//! The in-memory directory: one mutex-guarded map per collection.
//!
//! Uniqueness checks run under the owning collection's mutex, so a
//! check-then-insert is atomic — concurrent duplicate inserts resolve exactly
//! as a store-level uniqueness constraint would, with the loser receiving
//! `StoreError::Duplicate`.

use kinship_store::{
    AuditRecord, AuditStore, ConnectionRecord, ConnectionStore, Directory, DocumentRecord,
    DocumentStore, FamilyTreeRecord, FamilyTreeStore, MemberRecord, MemberStore, NodeRecord,
    NodeStore, NotificationRecord, NotificationStore, StoreError,
};
use kinship_types::{
    ConnectionId, DocumentId, FamilyCode, MemberId, NodeId, NotificationId, TreeId,
    VerificationStatus,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Thread-safe in-memory implementation of every Kinship store trait.
#[derive(Default)]
pub struct MemoryDirectory {
    members: Mutex<HashMap<String, MemberRecord>>,
    trees: Mutex<HashMap<String, FamilyTreeRecord>>,
    nodes: Mutex<HashMap<String, NodeRecord>>,
    connections: Mutex<HashMap<String, ConnectionRecord>>,
    notifications: Mutex<HashMap<String, NotificationRecord>>,
    documents: Mutex<HashMap<String, DocumentRecord>>,
    audit: Mutex<Vec<AuditRecord>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Directory for MemoryDirectory {
    type Members = Self;
    type Trees = Self;
    type Nodes = Self;
    type Connections = Self;
    type Notifications = Self;
    type Documents = Self;
    type Audit = Self;

    fn members(&self) -> &Self {
        self
    }
    fn trees(&self) -> &Self {
        self
    }
    fn nodes(&self) -> &Self {
        self
    }
    fn connections(&self) -> &Self {
        self
    }
    fn notifications(&self) -> &Self {
        self
    }
    fn documents(&self) -> &Self {
        self
    }
    fn audit(&self) -> &Self {
        self
    }
}

impl MemberStore for MemoryDirectory {
    fn insert_member(&self, record: &MemberRecord) -> Result<(), StoreError> {
        let mut members = self.members.lock().unwrap();
        let clash = members.values().any(|m| {
            m.login_id.eq_ignore_ascii_case(&record.login_id)
                || m.email.eq_ignore_ascii_case(&record.email)
        });
        if clash {
            return Err(StoreError::Duplicate(record.login_id.clone()));
        }
        members.insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_member(&self, id: &MemberId) -> Result<Option<MemberRecord>, StoreError> {
        Ok(self.members.lock().unwrap().get(id.as_str()).cloned())
    }

    fn member_by_login(&self, login_id: &str) -> Result<Option<MemberRecord>, StoreError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .find(|m| m.login_id.eq_ignore_ascii_case(login_id))
            .cloned())
    }

    fn put_member(&self, record: &MemberRecord) -> Result<(), StoreError> {
        self.members
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn login_id_exists(&self, login_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .any(|m| m.login_id.eq_ignore_ascii_case(login_id)))
    }

    fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .any(|m| m.email.eq_ignore_ascii_case(email)))
    }

    fn members_by_family(&self, code: &FamilyCode) -> Result<Vec<MemberRecord>, StoreError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.family_code.as_ref() == Some(code))
            .cloned()
            .collect())
    }

    fn members_by_status(
        &self,
        status: VerificationStatus,
    ) -> Result<Vec<MemberRecord>, StoreError> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .filter(|m| m.status == status)
            .cloned()
            .collect())
    }

    fn member_count(&self) -> Result<u64, StoreError> {
        Ok(self.members.lock().unwrap().len() as u64)
    }
}

impl FamilyTreeStore for MemoryDirectory {
    fn insert_tree(&self, record: &FamilyTreeRecord) -> Result<(), StoreError> {
        let mut trees = self.trees.lock().unwrap();
        if trees.values().any(|t| t.family_code == record.family_code) {
            return Err(StoreError::Duplicate(record.family_code.to_string()));
        }
        trees.insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_tree(&self, id: &TreeId) -> Result<Option<FamilyTreeRecord>, StoreError> {
        Ok(self.trees.lock().unwrap().get(id.as_str()).cloned())
    }

    fn tree_by_code(&self, code: &FamilyCode) -> Result<Option<FamilyTreeRecord>, StoreError> {
        Ok(self
            .trees
            .lock()
            .unwrap()
            .values()
            .find(|t| t.family_code == *code)
            .cloned())
    }

    fn put_tree(&self, record: &FamilyTreeRecord) -> Result<(), StoreError> {
        self.trees
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn iter_trees(&self) -> Result<Vec<FamilyTreeRecord>, StoreError> {
        Ok(self.trees.lock().unwrap().values().cloned().collect())
    }
}

impl NodeStore for MemoryDirectory {
    fn insert_node(&self, record: &NodeRecord) -> Result<(), StoreError> {
        let mut nodes = self.nodes.lock().unwrap();
        let clash = nodes
            .values()
            .any(|n| n.tree_id == record.tree_id && n.member_id == record.member_id);
        if clash {
            return Err(StoreError::Duplicate(format!(
                "{}/{}",
                record.tree_id, record.member_id
            )));
        }
        nodes.insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_node(&self, id: &NodeId) -> Result<Option<NodeRecord>, StoreError> {
        Ok(self.nodes.lock().unwrap().get(id.as_str()).cloned())
    }

    fn node_for_member(
        &self,
        tree_id: &TreeId,
        member_id: &MemberId,
    ) -> Result<Option<NodeRecord>, StoreError> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .values()
            .find(|n| n.tree_id == *tree_id && n.member_id == *member_id)
            .cloned())
    }

    fn put_node(&self, record: &NodeRecord) -> Result<(), StoreError> {
        self.nodes
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn nodes_by_tree(&self, tree_id: &TreeId) -> Result<Vec<NodeRecord>, StoreError> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.tree_id == *tree_id)
            .cloned()
            .collect())
    }

    fn node_count(&self) -> Result<u64, StoreError> {
        Ok(self.nodes.lock().unwrap().len() as u64)
    }
}

impl ConnectionStore for MemoryDirectory {
    fn insert_connection(&self, record: &ConnectionRecord) -> Result<(), StoreError> {
        self.connections
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_connection(&self, id: &ConnectionId) -> Result<Option<ConnectionRecord>, StoreError> {
        Ok(self.connections.lock().unwrap().get(id.as_str()).cloned())
    }

    fn put_connection(&self, record: &ConnectionRecord) -> Result<(), StoreError> {
        self.connections
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn delete_connection(&self, id: &ConnectionId) -> Result<(), StoreError> {
        self.connections
            .lock()
            .unwrap()
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn connections_by_tree(&self, tree_id: &TreeId) -> Result<Vec<ConnectionRecord>, StoreError> {
        Ok(self
            .connections
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.tree_id == *tree_id)
            .cloned()
            .collect())
    }

    fn connection_count(&self) -> Result<u64, StoreError> {
        Ok(self.connections.lock().unwrap().len() as u64)
    }
}

impl NotificationStore for MemoryDirectory {
    fn insert_notification(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        self.notifications
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_notification(
        &self,
        id: &NotificationId,
    ) -> Result<Option<NotificationRecord>, StoreError> {
        Ok(self.notifications.lock().unwrap().get(id.as_str()).cloned())
    }

    fn put_notification(&self, record: &NotificationRecord) -> Result<(), StoreError> {
        self.notifications
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn notifications_by_user(
        &self,
        user_id: &MemberId,
    ) -> Result<Vec<NotificationRecord>, StoreError> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.user_id == *user_id)
            .cloned()
            .collect())
    }
}

impl DocumentStore for MemoryDirectory {
    fn insert_document(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        self.documents
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_document(&self, id: &DocumentId) -> Result<Option<DocumentRecord>, StoreError> {
        Ok(self.documents.lock().unwrap().get(id.as_str()).cloned())
    }

    fn documents_by_owner(&self, owner: &MemberId) -> Result<Vec<DocumentRecord>, StoreError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.owner.as_ref() == Some(owner))
            .cloned()
            .collect())
    }

    fn documents_by_node(&self, node: &NodeId) -> Result<Vec<DocumentRecord>, StoreError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.family_member_node.as_ref() == Some(node))
            .cloned()
            .collect())
    }
}

impl AuditStore for MemoryDirectory {
    fn append_audit(&self, record: &AuditRecord) -> Result<(), StoreError> {
        self.audit.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn audit_for_entity(
        &self,
        entity_kind: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        Ok(self
            .audit
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.entity_kind == entity_kind && a.entity_id == entity_id)
            .cloned()
            .collect())
    }

    fn audit_by_actor(&self, actor: &MemberId) -> Result<Vec<AuditRecord>, StoreError> {
        Ok(self
            .audit
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.actor == *actor)
            .cloned()
            .collect())
    }
}
