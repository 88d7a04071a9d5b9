//! Append-only audit trail.

use crate::NotifyError;
use kinship_store::{AuditRecord, AuditStore, Directory};
use kinship_types::{AuditId, MemberId, Timestamp};
use std::sync::Arc;

/// Records who changed what. Entries are only ever appended.
pub struct AuditTrail<D: Directory> {
    dir: Arc<D>,
}

impl<D: Directory> AuditTrail<D> {
    pub fn new(dir: Arc<D>) -> Self {
        Self { dir }
    }

    /// Append one audit entry with optional old/new snapshots.
    pub fn record(
        &self,
        actor: &MemberId,
        action: &str,
        entity_kind: &str,
        entity_id: &str,
        old_value: Option<serde_json::Value>,
        new_value: Option<serde_json::Value>,
    ) -> Result<AuditRecord, NotifyError> {
        let record = AuditRecord {
            id: AuditId::generate(),
            actor: actor.clone(),
            action: action.to_string(),
            entity_kind: entity_kind.to_string(),
            entity_id: entity_id.to_string(),
            old_value,
            new_value,
            created_at: Timestamp::now(),
        };
        self.dir.audit().append_audit(&record)?;
        Ok(record)
    }

    /// Append an entry, swallowing failure: audit writes are best-effort side
    /// effects of the primary mutation.
    pub fn record_best_effort(
        &self,
        actor: &MemberId,
        action: &str,
        entity_kind: &str,
        entity_id: &str,
        old_value: Option<serde_json::Value>,
        new_value: Option<serde_json::Value>,
    ) {
        if let Err(e) = self.record(actor, action, entity_kind, entity_id, old_value, new_value) {
            tracing::warn!(
                actor = %actor,
                action,
                entity = %entity_id,
                error = %e,
                "dropping unwritable audit entry"
            );
        }
    }

    pub fn for_entity(
        &self,
        entity_kind: &str,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, NotifyError> {
        Ok(self.dir.audit().audit_for_entity(entity_kind, entity_id)?)
    }

    pub fn for_actor(&self, actor: &MemberId) -> Result<Vec<AuditRecord>, NotifyError> {
        Ok(self.dir.audit().audit_by_actor(actor)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_store_memory::MemoryDirectory;

    #[test]
    fn record_and_read_back() {
        let trail = AuditTrail::new(Arc::new(MemoryDirectory::new()));
        let admin = MemberId::generate();
        trail
            .record(
                &admin,
                "member.status_changed",
                "member",
                "mbr_x",
                Some(serde_json::json!({"status": "Pending"})),
                Some(serde_json::json!({"status": "Verified"})),
            )
            .unwrap();

        let entries = trail.for_entity("member", "mbr_x").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "member.status_changed");
        assert_eq!(trail.for_actor(&admin).unwrap().len(), 1);
    }
}
