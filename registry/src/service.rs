//! The member registry service.

use crate::credential;
use crate::RegistryError;
use kinship_graph::{FamilyGraph, GraphError};
use kinship_notify::{AuditTrail, NewNotification, Notifications};
use kinship_store::{Directory, MemberRecord, MemberStore};
use kinship_types::{
    FamilyCode, MemberId, NotificationKind, NotificationPriority, Role, Timestamp,
    VerificationStatus,
};
use serde::Serialize;
use std::sync::Arc;

/// Policy for status transitions out of a terminal state.
///
/// By default a `Verified`/`Rejected` decision is final; deployments that
/// want admin re-review set `allow_re_review`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusPolicy {
    pub allow_re_review: bool,
}

/// A registration request.
#[derive(Clone, Debug)]
pub struct NewMember {
    pub login_id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Family to join; a tree is created when the code is new.
    pub family_code: Option<FamilyCode>,
    /// Display name for a newly created tree; defaults from the member name.
    pub family_name: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub relationship: Option<String>,
}

/// Aggregates for the admin dashboard.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardStats {
    pub total_members: u64,
    pub pending_members: u64,
    pub verified_members: u64,
    pub rejected_members: u64,
    pub families: u64,
    pub nodes: u64,
    pub connections: u64,
}

/// Member account operations over one directory.
pub struct MemberRegistry<D: Directory> {
    dir: Arc<D>,
    graph: FamilyGraph<D>,
    notifications: Notifications<D>,
    audit: AuditTrail<D>,
    policy: StatusPolicy,
}

impl<D: Directory> MemberRegistry<D> {
    pub fn new(dir: Arc<D>) -> Self {
        Self::with_policy(dir, StatusPolicy::default())
    }

    pub fn with_policy(dir: Arc<D>, policy: StatusPolicy) -> Self {
        Self {
            graph: FamilyGraph::new(dir.clone()),
            notifications: Notifications::new(dir.clone()),
            audit: AuditTrail::new(dir.clone()),
            dir,
            policy,
        }
    }

    /// Register a new member. The account starts `Pending`; when the family
    /// code is new, the family tree is created alongside, and the member's
    /// node is materialized either way.
    pub fn register(&self, new: NewMember) -> Result<MemberRecord, RegistryError> {
        for (field, value) in [
            ("login_id", &new.login_id),
            ("full_name", &new.full_name),
            ("email", &new.email),
            ("password", &new.password),
        ] {
            if value.trim().is_empty() {
                return Err(RegistryError::InvalidInput(field.to_string()));
            }
        }
        if !new.email.contains('@') {
            return Err(RegistryError::InvalidInput("email".to_string()));
        }

        let now = Timestamp::now();
        let record = MemberRecord {
            id: MemberId::generate(),
            login_id: new.login_id.trim().to_string(),
            full_name: new.full_name.trim().to_string(),
            email: new.email.trim().to_string(),
            password_hash: credential::hash_password(&new.password)?,
            role: new.role,
            family_code: new.family_code.clone(),
            status: VerificationStatus::Pending,
            avatar: None,
            gender: new.gender,
            location: new.location,
            relationship: new.relationship,
            created_at: now,
            updated_at: now,
        };

        match self.dir.members().insert_member(&record) {
            Ok(()) => {}
            Err(e) if e.is_duplicate() => return Err(RegistryError::AlreadyRegistered),
            Err(e) => return Err(e.into()),
        }

        if let Some(code) = &new.family_code {
            if self.graph.tree_by_code(code)?.is_none() {
                let name = new
                    .family_name
                    .unwrap_or_else(|| format!("{} Family", record.full_name));
                match self.graph.create_family_tree(&name, code.clone()) {
                    Ok(_) => {}
                    // Lost the creation race to a sibling registrant.
                    Err(GraphError::DuplicateFamilyCode(_)) => {}
                    Err(e) => return Err(e.into()),
                }
            }
            self.graph.ensure_nodes_for_family(code)?;
        }

        self.audit.record_best_effort(
            &record.id,
            "member.registered",
            "member",
            record.id.as_str(),
            None,
            Some(
                serde_json::json!({ "login_id": record.login_id, "family_code": record.family_code }),
            ),
        );
        Ok(record)
    }

    /// Verify a credential. `InvalidCredential` covers both unknown login and
    /// password mismatch, indistinguishably. Citizens must be `Verified` to
    /// sign in; admins bypass the status gate.
    pub fn sign_in(&self, login_id: &str, password: &str) -> Result<MemberRecord, RegistryError> {
        let member = self
            .dir
            .members()
            .member_by_login(login_id)?
            .ok_or(RegistryError::InvalidCredential)?;
        if !credential::verify_password(password, &member.password_hash) {
            return Err(RegistryError::InvalidCredential);
        }
        if !member.role.is_admin() && !member.status.can_sign_in() {
            return Err(RegistryError::AccountNotVerified(member.status));
        }
        Ok(member)
    }

    /// Uniqueness probe for registration forms. No side effects.
    pub fn check_login_id_exists(&self, login_id: &str) -> Result<bool, RegistryError> {
        Ok(self.dir.members().login_id_exists(login_id)?)
    }

    /// Uniqueness probe for registration forms. No side effects.
    pub fn check_email_exists(&self, email: &str) -> Result<bool, RegistryError> {
        Ok(self.dir.members().email_exists(email)?)
    }

    /// Transition a member's verification status.
    ///
    /// Re-applying the current status is a success no-op with no side
    /// effects. Leaving a terminal state requires `StatusPolicy::allow_re_review`.
    /// Each real transition audits the change and delivers a best-effort
    /// `Verification` notification to the member.
    pub fn update_member_status(
        &self,
        member_id: &MemberId,
        new_status: VerificationStatus,
        acting_admin: &MemberId,
    ) -> Result<MemberRecord, RegistryError> {
        let mut member = self
            .dir
            .members()
            .get_member(member_id)?
            .ok_or_else(|| RegistryError::MemberNotFound(member_id.to_string()))?;

        let old_status = member.status;
        if old_status == new_status {
            return Ok(member);
        }
        if old_status.is_terminal() && !self.policy.allow_re_review {
            return Err(RegistryError::InvalidTransition {
                from: old_status,
                to: new_status,
            });
        }

        member.status = new_status;
        member.updated_at = Timestamp::now();
        self.dir.members().put_member(&member)?;

        self.audit.record_best_effort(
            acting_admin,
            "member.status_changed",
            "member",
            member.id.as_str(),
            Some(serde_json::json!({ "status": old_status.to_string() })),
            Some(serde_json::json!({ "status": new_status.to_string() })),
        );
        let (title, body) = match new_status {
            VerificationStatus::Verified => (
                "Account verified",
                "Your account has been verified. Welcome to your family tree.",
            ),
            VerificationStatus::Rejected => (
                "Account rejected",
                "Your account did not pass verification. Contact your family admin.",
            ),
            VerificationStatus::Pending => ("Account under review", "Your account is under re-review."),
        };
        self.notifications.notify_best_effort(
            &member.id,
            NewNotification::new(NotificationKind::Verification, title, body)
                .with_priority(NotificationPriority::High),
        );

        if new_status == VerificationStatus::Verified {
            self.promote_root_if_vacant(&member);
        }
        Ok(member)
    }

    /// First verified member of a rootless tree becomes its root.
    fn promote_root_if_vacant(&self, member: &MemberRecord) {
        let Some(code) = &member.family_code else { return };
        let tree = match self.graph.tree_by_code(code) {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(member = %member.id, family = %code, error = %e, "root promotion skipped");
                return;
            }
        };
        if !tree.is_some_and(|t| t.root_member.is_none()) {
            return;
        }
        if let Err(e) = self.graph.designate_root(code, &member.id) {
            tracing::warn!(member = %member.id, family = %code, error = %e, "root promotion skipped");
        }
    }

    /// Remove a member from their family: the code binding is cleared, the
    /// node is hidden (never deleted — its connection history survives), and
    /// the family's member-array cache is recomputed.
    pub fn leave_family(&self, member_id: &MemberId) -> Result<MemberRecord, RegistryError> {
        let mut member = self
            .dir
            .members()
            .get_member(member_id)?
            .ok_or_else(|| RegistryError::MemberNotFound(member_id.to_string()))?;
        let code = member
            .family_code
            .take()
            .ok_or_else(|| RegistryError::NotInFamily(member_id.to_string()))?;

        match self.graph.hide_member_node(&code, member_id) {
            Ok(()) => {}
            // A member who registered before node materialization ran may
            // have no node yet; leaving is still valid.
            Err(GraphError::NodeNotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        member.updated_at = Timestamp::now();
        self.dir.members().put_member(&member)?;
        self.graph.update_family_member_arrays(&code)?;

        self.audit.record_best_effort(
            member_id,
            "member.left_family",
            "member",
            member.id.as_str(),
            Some(serde_json::json!({ "family_code": code.as_str() })),
            Some(serde_json::json!({ "family_code": null })),
        );
        Ok(member)
    }

    /// Re-bind a member to a family. If they held a node in that tree before
    /// leaving, the node flips back to visible rather than being recreated.
    pub fn rejoin_family(
        &self,
        member_id: &MemberId,
        code: &FamilyCode,
    ) -> Result<MemberRecord, RegistryError> {
        let mut member = self
            .dir
            .members()
            .get_member(member_id)?
            .ok_or_else(|| RegistryError::MemberNotFound(member_id.to_string()))?;
        if member.family_code.is_some() {
            return Err(RegistryError::InvalidInput(
                "member already belongs to a family".to_string(),
            ));
        }
        if self.graph.tree_by_code(code)?.is_none() {
            return Err(RegistryError::Graph(GraphError::TreeNotFound(
                code.to_string(),
            )));
        }

        member.family_code = Some(code.clone());
        member.updated_at = Timestamp::now();
        self.dir.members().put_member(&member)?;
        self.graph.ensure_nodes_for_family(code)?;

        self.audit.record_best_effort(
            member_id,
            "member.rejoined_family",
            "member",
            member.id.as_str(),
            None,
            Some(serde_json::json!({ "family_code": code.as_str() })),
        );
        Ok(member)
    }

    /// Members awaiting review, oldest first. Admin read path.
    pub fn get_pending_users(&self) -> Result<Vec<MemberRecord>, RegistryError> {
        let mut pending = self
            .dir
            .members()
            .members_by_status(VerificationStatus::Pending)?;
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(pending)
    }

    /// Aggregate counters for the admin dashboard.
    pub fn get_dashboard_stats(&self) -> Result<DashboardStats, RegistryError> {
        let summary = self.dir.summary()?;
        let members = self.dir.members();
        Ok(DashboardStats {
            total_members: summary.members,
            pending_members: members.count_by_status(VerificationStatus::Pending)?,
            verified_members: members.count_by_status(VerificationStatus::Verified)?,
            rejected_members: members.count_by_status(VerificationStatus::Rejected)?,
            families: summary.trees,
            nodes: summary.nodes,
            connections: summary.connections,
        })
    }

    /// The graph service sharing this registry's directory.
    pub fn graph(&self) -> &FamilyGraph<D> {
        &self.graph
    }
}
