//! Notification storage trait.

use crate::StoreError;
use kinship_types::{MemberId, NotificationId, NotificationKind, NotificationPriority, Timestamp};
use serde::{Deserialize, Serialize};

/// A notification delivered to one member.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub user_id: MemberId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub read: bool,
    pub read_at: Option<Timestamp>,
    /// Free-form event payload.
    #[serde(default)]
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// Trait for notification storage operations.
pub trait NotificationStore {
    fn insert_notification(&self, record: &NotificationRecord) -> Result<(), StoreError>;
    fn get_notification(
        &self,
        id: &NotificationId,
    ) -> Result<Option<NotificationRecord>, StoreError>;
    fn put_notification(&self, record: &NotificationRecord) -> Result<(), StoreError>;
    fn notifications_by_user(
        &self,
        user_id: &MemberId,
    ) -> Result<Vec<NotificationRecord>, StoreError>;

    /// Count a member's unread notifications.
    fn unread_count(&self, user_id: &MemberId) -> Result<u64, StoreError> {
        Ok(self
            .notifications_by_user(user_id)?
            .iter()
            .filter(|n| !n.read)
            .count() as u64)
    }
}
