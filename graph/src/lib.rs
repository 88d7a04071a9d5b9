//! The family tree graph — the central structure of Kinship.
//!
//! One tree per family code; one node per (tree, member) pair, carrying layout
//! and visibility; typed, labeled connections between nodes of the same tree.
//! Node existence is lazily materialized and idempotently reconciled by
//! [`FamilyGraph::ensure_nodes_for_family`]; the tree's member-id cache is a
//! derived projection rebuilt by [`FamilyGraph::update_family_member_arrays`].

pub mod connections;
pub mod error;
pub mod nodes;
pub mod search;
pub mod trees;

pub use connections::NewConnection;
pub use error::GraphError;
pub use nodes::{EnsureReport, NodeLayout};
pub use search::{MemberOption, SearchFilters};
pub use trees::FamilySummary;

use kinship_notify::{AuditTrail, Notifications};
use kinship_store::Directory;
use std::sync::Arc;

/// Family tree graph operations over one directory.
///
/// Notification and audit writes made here are best-effort side effects of
/// the primary mutation.
pub struct FamilyGraph<D: Directory> {
    dir: Arc<D>,
    notifications: Notifications<D>,
    audit: AuditTrail<D>,
}

impl<D: Directory> FamilyGraph<D> {
    pub fn new(dir: Arc<D>) -> Self {
        Self {
            notifications: Notifications::new(dir.clone()),
            audit: AuditTrail::new(dir.clone()),
            dir,
        }
    }

    pub(crate) fn dir(&self) -> &D {
        &self.dir
    }

    pub(crate) fn notifications(&self) -> &Notifications<D> {
        &self.notifications
    }

    pub(crate) fn audit(&self) -> &AuditTrail<D> {
        &self.audit
    }
}
