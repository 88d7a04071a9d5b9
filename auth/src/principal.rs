//! The authenticated caller and the two capability predicates.

use crate::AuthError;
use kinship_types::{FamilyCode, MemberId, Role};
use serde::{Deserialize, Serialize};

/// The caller's resolved identity, derived from a verified session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub member_id: MemberId,
    pub role: Role,
    pub family_code: Option<FamilyCode>,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fail with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden("admin privilege required".into()))
        }
    }

    /// Whether the caller may read or mutate a single-user resource
    /// (avatars, personal documents): admin, or the resource owner.
    pub fn can_access_user_data(&self, target: &MemberId) -> bool {
        self.is_admin() || self.member_id == *target
    }

    /// Whether the caller may touch a family-scoped resource (tree search,
    /// node ensure, member listings): admin, or a member of that family.
    pub fn is_same_family(&self, code: &FamilyCode) -> bool {
        self.is_admin() || self.family_code.as_ref() == Some(code)
    }

    /// `is_same_family` as a guard, for boundaries that want the error.
    pub fn require_same_family(&self, code: &FamilyCode) -> Result<(), AuthError> {
        if self.is_same_family(code) {
            Ok(())
        } else {
            Err(AuthError::Forbidden(format!(
                "not a member of family {code}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citizen(code: &str) -> Principal {
        Principal {
            member_id: MemberId::generate(),
            role: Role::Citizen,
            family_code: Some(FamilyCode::parse(code).unwrap()),
        }
    }

    fn admin() -> Principal {
        Principal {
            member_id: MemberId::generate(),
            role: Role::Admin,
            family_code: None,
        }
    }

    #[test]
    fn admin_accesses_any_user_data() {
        let a = admin();
        assert!(a.can_access_user_data(&MemberId::generate()));
    }

    #[test]
    fn citizen_accesses_only_own_data() {
        let c = citizen("FAM123");
        let own = c.member_id.clone();
        assert!(c.can_access_user_data(&own));
        assert!(!c.can_access_user_data(&MemberId::generate()));
    }

    #[test]
    fn same_family_respects_code() {
        let c = citizen("FAM123");
        assert!(c.is_same_family(&FamilyCode::parse("fam123").unwrap()));
        assert!(!c.is_same_family(&FamilyCode::parse("FAM999").unwrap()));
    }

    #[test]
    fn admin_is_exempt_from_family_scoping() {
        let a = admin();
        assert!(a.is_same_family(&FamilyCode::parse("FAM999").unwrap()));
        assert!(a.require_admin().is_ok());
    }

    #[test]
    fn citizen_without_family_is_scoped_out() {
        let mut c = citizen("FAM123");
        c.family_code = None;
        assert!(!c.is_same_family(&FamilyCode::parse("FAM123").unwrap()));
        assert!(c.require_admin().is_err());
    }
}
