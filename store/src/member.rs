//! Member account storage trait.

use crate::StoreError;
use kinship_types::{FamilyCode, MemberId, Role, Timestamp, VerificationStatus};
use serde::{Deserialize, Serialize};

/// A registered person, citizen or admin.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: MemberId,
    /// Login identifier, unique across all members.
    pub login_id: String,
    pub full_name: String,
    /// Email, unique across all members.
    pub email: String,
    /// Argon2id hash in PHC string format. Never the plaintext.
    pub password_hash: String,
    pub role: Role,
    /// Family the member currently belongs to. Cleared (not the record
    /// deleted) when the member leaves.
    pub family_code: Option<FamilyCode>,
    pub status: VerificationStatus,
    /// Avatar image bytes, if one was uploaded.
    #[serde(default)]
    pub avatar: Option<Vec<u8>>,
    /// Profile fields used by family search filters.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form self-described relation to the family root.
    #[serde(default)]
    pub relationship: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for member storage operations.
pub trait MemberStore {
    /// Insert a new member; `StoreError::Duplicate` when the login id or
    /// email is already taken.
    fn insert_member(&self, record: &MemberRecord) -> Result<(), StoreError>;
    fn get_member(&self, id: &MemberId) -> Result<Option<MemberRecord>, StoreError>;
    fn member_by_login(&self, login_id: &str) -> Result<Option<MemberRecord>, StoreError>;
    fn put_member(&self, record: &MemberRecord) -> Result<(), StoreError>;
    fn login_id_exists(&self, login_id: &str) -> Result<bool, StoreError>;
    fn email_exists(&self, email: &str) -> Result<bool, StoreError>;
    fn members_by_family(&self, code: &FamilyCode) -> Result<Vec<MemberRecord>, StoreError>;
    fn members_by_status(&self, status: VerificationStatus)
        -> Result<Vec<MemberRecord>, StoreError>;
    fn member_count(&self) -> Result<u64, StoreError>;

    /// Count members in a status without allocating the full result set.
    fn count_by_status(&self, status: VerificationStatus) -> Result<u64, StoreError> {
        self.members_by_status(status).map(|v| v.len() as u64)
    }
}
