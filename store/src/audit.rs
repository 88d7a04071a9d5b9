//! Append-only audit trail storage.

use crate::StoreError;
use kinship_types::{AuditId, MemberId, Timestamp};
use serde::{Deserialize, Serialize};

/// One audit entry: who changed what, with old/new snapshots.
///
/// Entries are append-only; no store operation mutates an existing entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: AuditId,
    pub actor: MemberId,
    /// Verb describing the change, e.g. `member.status_changed`.
    pub action: String,
    /// Kind of the affected entity, e.g. `member`, `connection`.
    pub entity_kind: String,
    pub entity_id: String,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// Trait for audit trail storage operations.
pub trait AuditStore {
    fn append_audit(&self, record: &AuditRecord) -> Result<(), StoreError>;
    fn audit_for_entity(
        &self,
        entity_kind: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, StoreError>;
    fn audit_by_actor(&self, actor: &MemberId) -> Result<Vec<AuditRecord>, StoreError>;
}
