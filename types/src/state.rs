//! State enums for members, nodes, connections, notifications, and documents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role of a registered account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular family member, scoped to their own family code.
    Citizen,
    /// Administrator, exempt from family-code scoping.
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The verification state of a member account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Registered, awaiting admin review.
    Pending,
    /// Reviewed and accepted — may sign in and appear in public search.
    Verified,
    /// Reviewed and declined.
    Rejected,
}

impl VerificationStatus {
    /// Whether this status is a review outcome (no further transition without
    /// an explicit re-review).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }

    /// Whether a citizen in this status may sign in. Admins bypass this check.
    pub fn can_sign_in(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Whether the member may be exposed in public search or act as tree root.
    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        };
        write!(f, "{s}")
    }
}

/// Visibility lifecycle of a family tree node.
///
/// A node is never destroyed once created: leaving a family hides it
/// (preserving connection history), rejoining flips it back to `Active`.
/// `Removed` is reserved for a future hard-delete/export path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeVisibility {
    Active,
    Hidden,
    Removed,
}

impl NodeVisibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// The semantic type of a connection between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    Parent,
    Child,
    Sibling,
    Spouse,
    Other,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Sibling => "sibling",
            Self::Spouse => "spouse",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// What kind of domain event a notification reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// A verification review outcome for the recipient.
    Verification,
    /// A new member materialized in the recipient's family tree.
    MemberAdded,
    /// A connection involving the recipient's family was edited or deleted.
    ConnectionChanged,
    /// Operator-issued system message.
    System,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationPriority {
    Low,
    Normal,
    High,
}

/// Category of an uploaded document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    BirthCertificate,
    MarriageCertificate,
    Photograph,
    Identity,
    Other,
}
