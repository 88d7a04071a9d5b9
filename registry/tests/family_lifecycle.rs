//! Full membership lifecycle over the in-memory backend: registration,
//! verification, leaving and rejoining a family, and the authorization
//! boundary around connection edits.

use kinship_auth::Principal;
use kinship_graph::{NewConnection, SearchFilters};
use kinship_registry::{MemberRegistry, NewMember, RegistryError, StatusPolicy};
use kinship_store::{MemberRecord, MemberStore, NodeStore, NotificationStore};
use kinship_store_memory::MemoryDirectory;
use kinship_types::{
    FamilyCode, MemberId, NodeVisibility, NotificationKind, RelationshipType, Role,
    VerificationStatus,
};
use std::sync::Arc;

fn registry() -> (Arc<MemoryDirectory>, MemberRegistry<MemoryDirectory>) {
    let dir = Arc::new(MemoryDirectory::new());
    (dir.clone(), MemberRegistry::new(dir))
}

fn new_member(login: &str, name: &str, code: Option<&str>) -> NewMember {
    NewMember {
        login_id: login.to_string(),
        full_name: name.to_string(),
        email: format!("{login}@example.com"),
        password: "hunter2hunter2".to_string(),
        role: Role::Citizen,
        family_code: code.map(|c| FamilyCode::parse(c).unwrap()),
        family_name: None,
        gender: None,
        location: None,
        relationship: None,
    }
}

fn admin_id() -> MemberId {
    MemberId::generate()
}

#[test]
fn registration_creates_tree_and_node() {
    let (dir, reg) = registry();
    let a = reg.register(new_member("alice", "Alice", Some("FAM123"))).unwrap();
    assert_eq!(a.status, VerificationStatus::Pending);

    let code = FamilyCode::parse("FAM123").unwrap();
    let tree = reg.graph().tree_by_code(&code).unwrap().unwrap();
    assert_eq!(tree.member_count, 1);
    assert!(dir.node_for_member(&tree.id, &a.id).unwrap().is_some());
}

#[test]
fn duplicate_registration_is_rejected() {
    let (_dir, reg) = registry();
    reg.register(new_member("alice", "Alice", None)).unwrap();
    assert!(matches!(
        reg.register(new_member("alice", "Other Alice", None)),
        Err(RegistryError::AlreadyRegistered)
    ));
    assert!(reg.check_login_id_exists("ALICE").unwrap());
    assert!(reg.check_email_exists("alice@example.com").unwrap());
    assert!(!reg.check_login_id_exists("bob").unwrap());
}

#[test]
fn registration_validates_fields() {
    let (_dir, reg) = registry();
    let mut bad = new_member("carl", "Carl", None);
    bad.email = "not-an-email".to_string();
    assert!(matches!(
        reg.register(bad),
        Err(RegistryError::InvalidInput(_))
    ));
    let mut blank = new_member("dora", "Dora", None);
    blank.password = "  ".to_string();
    assert!(matches!(
        reg.register(blank),
        Err(RegistryError::InvalidInput(_))
    ));
}

#[test]
fn sign_in_gates_on_status_and_credential() {
    let (_dir, reg) = registry();
    let a = reg.register(new_member("alice", "Alice", None)).unwrap();

    assert!(matches!(
        reg.sign_in("alice", "wrong password"),
        Err(RegistryError::InvalidCredential)
    ));
    assert!(matches!(
        reg.sign_in("nobody", "hunter2hunter2"),
        Err(RegistryError::InvalidCredential)
    ));
    // Pending members cannot sign in yet.
    assert!(matches!(
        reg.sign_in("alice", "hunter2hunter2"),
        Err(RegistryError::AccountNotVerified(VerificationStatus::Pending))
    ));

    reg.update_member_status(&a.id, VerificationStatus::Verified, &admin_id())
        .unwrap();
    let signed = reg.sign_in("alice", "hunter2hunter2").unwrap();
    assert_eq!(signed.id, a.id);
}

#[test]
fn admin_signs_in_regardless_of_status() {
    let (_dir, reg) = registry();
    let mut admin = new_member("root_admin", "Admin", None);
    admin.role = Role::Admin;
    reg.register(admin).unwrap();
    assert!(reg.sign_in("root_admin", "hunter2hunter2").is_ok());
}

#[test]
fn status_transition_notifies_once_and_reapplication_is_noop() {
    let (dir, reg) = registry();
    let a = reg.register(new_member("alice", "Alice", Some("FAM123"))).unwrap();
    let admin = admin_id();

    reg.update_member_status(&a.id, VerificationStatus::Verified, &admin)
        .unwrap();
    // Idempotent re-application: success, no extra notification.
    reg.update_member_status(&a.id, VerificationStatus::Verified, &admin)
        .unwrap();

    let verification_notes: Vec<_> = dir
        .notifications_by_user(&a.id)
        .unwrap()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::Verification)
        .collect();
    assert_eq!(verification_notes.len(), 1);
}

#[test]
fn terminal_states_need_re_review_policy() {
    let (_dir, reg) = registry();
    let a = reg.register(new_member("alice", "Alice", None)).unwrap();
    let admin = admin_id();
    reg.update_member_status(&a.id, VerificationStatus::Rejected, &admin)
        .unwrap();
    assert!(matches!(
        reg.update_member_status(&a.id, VerificationStatus::Verified, &admin),
        Err(RegistryError::InvalidTransition { .. })
    ));

    let dir = Arc::new(MemoryDirectory::new());
    let lenient = MemberRegistry::with_policy(dir, StatusPolicy { allow_re_review: true });
    let b = lenient.register(new_member("bob", "Bob", None)).unwrap();
    lenient
        .update_member_status(&b.id, VerificationStatus::Rejected, &admin)
        .unwrap();
    lenient
        .update_member_status(&b.id, VerificationStatus::Verified, &admin)
        .unwrap();
}

#[test]
fn family_lifecycle_scenario() {
    let (dir, reg) = registry();
    let code = FamilyCode::parse("FAM123").unwrap();
    let admin = admin_id();

    // A registers first, gets verified, becomes root.
    let a = reg.register(new_member("a_root", "A", Some("FAM123"))).unwrap();
    reg.update_member_status(&a.id, VerificationStatus::Verified, &admin)
        .unwrap();
    let tree = reg.graph().tree_by_code(&code).unwrap().unwrap();
    assert_eq!(tree.root_member, Some(a.id.clone()));

    // B registers into the same family; both nodes exist.
    let b = reg.register(new_member("b_member", "B", Some("FAM123"))).unwrap();
    let report = reg.graph().ensure_nodes_for_family(&code).unwrap();
    assert_eq!(report.created, 0, "registration already materialized nodes");
    assert_eq!(report.existing, 2);

    // Promoting B emits exactly one verification notification to B.
    reg.update_member_status(&b.id, VerificationStatus::Verified, &admin)
        .unwrap();
    let b_notes: Vec<_> = dir
        .notifications_by_user(&b.id)
        .unwrap()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::Verification)
        .collect();
    assert_eq!(b_notes.len(), 1);

    // B leaves: binding cleared, node hidden but alive, search forgets B.
    let b_after = reg.leave_family(&b.id).unwrap();
    assert!(b_after.family_code.is_none());
    let tree = reg.graph().tree_by_code(&code).unwrap().unwrap();
    let b_node = dir.node_for_member(&tree.id, &b.id).unwrap().unwrap();
    assert_eq!(b_node.visibility, NodeVisibility::Hidden);

    let found = reg
        .graph()
        .search_family_members(&tree.id, &SearchFilters::default())
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, a.id);

    let options = reg.graph().members_for_selection(&tree.id).unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].display_name, "A (Root Member)");
    assert!(options[0].is_root_member);
}

#[test]
fn leaving_without_family_fails() {
    let (_dir, reg) = registry();
    let a = reg.register(new_member("alice", "Alice", None)).unwrap();
    assert!(matches!(
        reg.leave_family(&a.id),
        Err(RegistryError::NotInFamily(_))
    ));
}

#[test]
fn rejoin_revives_the_old_node() {
    let (dir, reg) = registry();
    let code = FamilyCode::parse("FAM123").unwrap();
    let a = reg.register(new_member("alice", "Alice", Some("FAM123"))).unwrap();
    let tree = reg.graph().tree_by_code(&code).unwrap().unwrap();
    let node_before = dir.node_for_member(&tree.id, &a.id).unwrap().unwrap();

    reg.leave_family(&a.id).unwrap();
    let tree_empty = reg.graph().tree_by_code(&code).unwrap().unwrap();
    assert!(!tree_empty.active);

    reg.rejoin_family(&a.id, &code).unwrap();
    let node_after = dir.node_for_member(&tree.id, &a.id).unwrap().unwrap();
    assert_eq!(node_after.id, node_before.id, "node is revived, not recreated");
    assert_eq!(node_after.visibility, NodeVisibility::Active);
    assert!(reg.graph().tree_by_code(&code).unwrap().unwrap().active);
}

#[test]
fn root_seat_is_vacated_when_root_leaves() {
    let (_dir, reg) = registry();
    let code = FamilyCode::parse("FAM123").unwrap();
    let a = reg.register(new_member("alice", "Alice", Some("FAM123"))).unwrap();
    reg.update_member_status(&a.id, VerificationStatus::Verified, &admin_id())
        .unwrap();
    assert!(reg.graph().tree_by_code(&code).unwrap().unwrap().root_member.is_some());

    reg.leave_family(&a.id).unwrap();
    assert!(reg.graph().tree_by_code(&code).unwrap().unwrap().root_member.is_none());
}

#[test]
fn cross_family_connection_edit_is_forbidden_at_the_boundary() {
    let (dir, reg) = registry();
    let admin = admin_id();

    // Family FAM999 with two members and one connection.
    let x = reg.register(new_member("x1", "X One", Some("FAM999"))).unwrap();
    let y = reg.register(new_member("y1", "Y One", Some("FAM999"))).unwrap();
    let code999 = FamilyCode::parse("FAM999").unwrap();
    let tree999 = reg.graph().tree_by_code(&code999).unwrap().unwrap();
    let node_x = dir.node_for_member(&tree999.id, &x.id).unwrap().unwrap();
    let node_y = dir.node_for_member(&tree999.id, &y.id).unwrap().unwrap();
    let conn = reg
        .graph()
        .create_connection(
            NewConnection {
                source_node: node_x.id,
                target_node: node_y.id,
                relationship_type: RelationshipType::Sibling,
                relationship_label: "sister".to_string(),
            },
            &x.id,
        )
        .unwrap();

    // A FAM123 citizen tries to edit it: the boundary composes the exposed
    // scope with `is_same_family` and refuses before touching the graph.
    let intruder = reg.register(new_member("z1", "Z One", Some("FAM123"))).unwrap();
    let principal = Principal {
        member_id: intruder.id.clone(),
        role: Role::Citizen,
        family_code: intruder.family_code.clone(),
    };
    let scope = reg.graph().connection_scope(&conn.id).unwrap();
    assert!(principal.require_same_family(&scope).is_err());

    // An admin principal passes the same gate.
    let admin_principal = Principal {
        member_id: admin,
        role: Role::Admin,
        family_code: None,
    };
    assert!(admin_principal.require_same_family(&scope).is_ok());
    reg.graph()
        .update_connection(&conn.id, RelationshipType::Sibling, "half-sister", &admin_principal.member_id)
        .unwrap();
}

#[test]
fn verification_survives_a_missing_family_tree() {
    let (dir, reg) = registry();
    // A member bound to a code whose tree was never created: root promotion
    // has nowhere to go, but the verification itself must still land.
    let code = FamilyCode::parse("GHOST1").unwrap();
    let now = kinship_types::Timestamp::now();
    let orphan = MemberRecord {
        id: MemberId::generate(),
        login_id: "orphan".to_string(),
        full_name: "Orphan".to_string(),
        email: "orphan@example.com".to_string(),
        password_hash: "$argon2id$test".to_string(),
        role: Role::Citizen,
        family_code: Some(code.clone()),
        status: VerificationStatus::Pending,
        avatar: None,
        gender: None,
        location: None,
        relationship: None,
        created_at: now,
        updated_at: now,
    };
    dir.insert_member(&orphan).unwrap();

    let after = reg
        .update_member_status(&orphan.id, VerificationStatus::Verified, &admin_id())
        .unwrap();
    assert_eq!(after.status, VerificationStatus::Verified);
    assert!(reg.graph().tree_by_code(&code).unwrap().is_none());
}

#[test]
fn dashboard_and_pending_queue() {
    let (_dir, reg) = registry();
    let admin = admin_id();
    let a = reg.register(new_member("a1", "Ann", Some("FAM123"))).unwrap();
    reg.register(new_member("b1", "Ben", Some("FAM123"))).unwrap();
    reg.register(new_member("c1", "Cam", Some("FAM456"))).unwrap();
    reg.update_member_status(&a.id, VerificationStatus::Verified, &admin)
        .unwrap();

    let stats = reg.get_dashboard_stats().unwrap();
    assert_eq!(stats.total_members, 3);
    assert_eq!(stats.verified_members, 1);
    assert_eq!(stats.pending_members, 2);
    assert_eq!(stats.families, 2);
    assert_eq!(stats.nodes, 3);

    let pending = reg.get_pending_users().unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|m| m.status == VerificationStatus::Pending));
}
