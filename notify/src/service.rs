//! Notification service.

use crate::NotifyError;
use kinship_store::{Directory, NotificationRecord, NotificationStore};
use kinship_types::{MemberId, NotificationId, NotificationKind, NotificationPriority, Timestamp};
use std::sync::Arc;

/// Content of a notification about to be delivered.
#[derive(Clone, Debug)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub payload: serde_json::Value,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            priority: NotificationPriority::Normal,
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Notification read/write operations for one directory.
pub struct Notifications<D: Directory> {
    dir: Arc<D>,
}

impl<D: Directory> Notifications<D> {
    pub fn new(dir: Arc<D>) -> Self {
        Self { dir }
    }

    /// Deliver a notification to a member.
    pub fn notify(
        &self,
        user_id: &MemberId,
        content: NewNotification,
    ) -> Result<NotificationRecord, NotifyError> {
        let record = NotificationRecord {
            id: NotificationId::generate(),
            user_id: user_id.clone(),
            kind: content.kind,
            title: content.title,
            message: content.message,
            priority: content.priority,
            read: false,
            read_at: None,
            payload: content.payload,
            created_at: Timestamp::now(),
        };
        self.dir.notifications().insert_notification(&record)?;
        Ok(record)
    }

    /// A member's notifications, newest first, optionally unread only.
    pub fn list(
        &self,
        user_id: &MemberId,
        unread_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotifyError> {
        let mut items = self.dir.notifications().notifications_by_user(user_id)?;
        if unread_only {
            items.retain(|n| !n.read);
        }
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    /// Mark one notification read. `Forbidden` when it belongs to someone
    /// else; marking an already-read notification is a no-op success.
    pub fn mark_read(&self, id: &NotificationId, user_id: &MemberId) -> Result<(), NotifyError> {
        let mut record = self
            .dir
            .notifications()
            .get_notification(id)?
            .ok_or_else(|| NotifyError::NotFound(id.to_string()))?;
        if record.user_id != *user_id {
            return Err(NotifyError::Forbidden(id.to_string()));
        }
        if record.read {
            return Ok(());
        }
        record.read = true;
        record.read_at = Some(Timestamp::now());
        self.dir.notifications().put_notification(&record)?;
        Ok(())
    }

    /// Mark all of a member's notifications read; returns how many flipped.
    /// Idempotent: a second call returns 0.
    pub fn mark_all_read(&self, user_id: &MemberId) -> Result<u64, NotifyError> {
        let now = Timestamp::now();
        let mut flipped = 0;
        for mut record in self.dir.notifications().notifications_by_user(user_id)? {
            if record.read {
                continue;
            }
            record.read = true;
            record.read_at = Some(now);
            self.dir.notifications().put_notification(&record)?;
            flipped += 1;
        }
        Ok(flipped)
    }

    pub fn unread_count(&self, user_id: &MemberId) -> Result<u64, NotifyError> {
        Ok(self.dir.notifications().unread_count(user_id)?)
    }

    /// Deliver a notification, swallowing failure. Mutating operations call
    /// this so a notification outage cannot block the primary write.
    pub fn notify_best_effort(&self, user_id: &MemberId, content: NewNotification) {
        if let Err(e) = self.notify(user_id, content) {
            tracing::warn!(user = %user_id, error = %e, "dropping undeliverable notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_store_memory::MemoryDirectory;
    use kinship_types::NotificationKind;

    fn service() -> Notifications<MemoryDirectory> {
        Notifications::new(Arc::new(MemoryDirectory::new()))
    }

    #[test]
    fn notify_then_list_unread() {
        let svc = service();
        let user = MemberId::generate();
        svc.notify(
            &user,
            NewNotification::new(NotificationKind::System, "Welcome", "hello"),
        )
        .unwrap();
        let items = svc.list(&user, true).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Welcome");
    }

    #[test]
    fn mark_read_requires_ownership() {
        let svc = service();
        let owner = MemberId::generate();
        let stranger = MemberId::generate();
        let n = svc
            .notify(
                &owner,
                NewNotification::new(NotificationKind::Verification, "Reviewed", "verified"),
            )
            .unwrap();

        let err = svc.mark_read(&n.id, &stranger).unwrap_err();
        assert!(matches!(err, NotifyError::Forbidden(_)));

        svc.mark_read(&n.id, &owner).unwrap();
        // Re-marking is a no-op success.
        svc.mark_read(&n.id, &owner).unwrap();
        assert!(svc.list(&owner, true).unwrap().is_empty());
    }

    #[test]
    fn mark_all_read_is_idempotent() {
        let svc = service();
        let user = MemberId::generate();
        for i in 0..3 {
            svc.notify(
                &user,
                NewNotification::new(NotificationKind::System, format!("n{i}"), "m"),
            )
            .unwrap();
        }
        assert_eq!(svc.mark_all_read(&user).unwrap(), 3);
        assert_eq!(svc.mark_all_read(&user).unwrap(), 0);
        assert_eq!(svc.unread_count(&user).unwrap(), 0);
    }

    #[test]
    fn missing_notification_is_not_found() {
        let svc = service();
        let err = svc
            .mark_read(&NotificationId::generate(), &MemberId::generate())
            .unwrap_err();
        assert!(matches!(err, NotifyError::NotFound(_)));
    }
}
