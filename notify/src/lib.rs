//! Notification delivery and the append-only audit trail.
//!
//! Both are consumed as best-effort side effects by mutating operations
//! elsewhere: the primary mutation never rolls back because a notification or
//! audit write failed.

pub mod audit;
pub mod error;
pub mod service;

pub use audit::AuditTrail;
pub use error::NotifyError;
pub use service::{NewNotification, Notifications};
