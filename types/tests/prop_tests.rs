use proptest::prelude::*;

use kinship_types::{FamilyCode, Timestamp};

proptest! {
    /// Parsing is idempotent: re-parsing a normalized code yields the same code.
    #[test]
    fn family_code_parse_idempotent(raw in "[A-Za-z0-9_-]{3,32}") {
        let first = FamilyCode::parse(&raw).unwrap();
        let second = FamilyCode::parse(first.as_str()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Case never distinguishes two codes.
    #[test]
    fn family_code_case_insensitive(raw in "[a-z0-9_-]{3,32}") {
        let lower = FamilyCode::parse(&raw).unwrap();
        let upper = FamilyCode::parse(&raw.to_ascii_uppercase()).unwrap();
        prop_assert_eq!(lower, upper);
    }

    /// Normalized codes only contain uppercase alphanumerics, `-` and `_`.
    #[test]
    fn family_code_normal_form(raw in "[A-Za-z0-9_-]{3,32}") {
        let code = FamilyCode::parse(&raw).unwrap();
        prop_assert!(code
            .as_str()
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_'));
    }

    /// Codes outside the length bounds never parse.
    #[test]
    fn family_code_length_bounds(raw in "[A-Z0-9]{33,64}") {
        prop_assert!(FamilyCode::parse(&raw).is_err());
    }

    /// Timestamp ordering matches the underlying seconds.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// `has_expired` agrees with saturating arithmetic on the raw seconds.
    #[test]
    fn timestamp_expiry(start in 0u64..u64::MAX / 2, ttl in 0u64..u64::MAX / 2, now in 0u64..u64::MAX) {
        let t = Timestamp::new(start);
        prop_assert_eq!(t.has_expired(ttl, Timestamp::new(now)), now >= start.saturating_add(ttl));
    }
}
