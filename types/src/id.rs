//! Opaque, prefixed entity ids.
//!
//! Each id is a short prefix plus 16 random bytes, hex encoded, e.g.
//! `mbr_9f2c…`. The prefix makes ids self-describing in logs and audit
//! entries without a lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

fn random_suffix() -> String {
    let mut bytes = [0u8; 16];
    getrandom::getrandom(&mut bytes).expect("OS RNG unavailable");
    hex::encode(bytes)
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// The prefix carried by every id of this type.
            pub const PREFIX: &'static str = $prefix;

            /// Wrap a raw id string (e.g. read back from storage).
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Generate a fresh random id.
            pub fn generate() -> Self {
                Self(format!("{}{}", Self::PREFIX, random_suffix()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

entity_id!(
    /// Id of a registered member account.
    MemberId,
    "mbr_"
);
entity_id!(
    /// Id of a family tree.
    TreeId,
    "tree_"
);
entity_id!(
    /// Id of a member's node within one family tree.
    NodeId,
    "node_"
);
entity_id!(
    /// Id of a typed connection (edge) between two nodes.
    ConnectionId,
    "conn_"
);
entity_id!(
    /// Id of a notification.
    NotificationId,
    "ntf_"
);
entity_id!(
    /// Id of an uploaded document.
    DocumentId,
    "doc_"
);
entity_id!(
    /// Id of an append-only audit entry.
    AuditId,
    "aud_"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_prefix() {
        assert!(MemberId::generate().as_str().starts_with("mbr_"));
        assert!(TreeId::generate().as_str().starts_with("tree_"));
        assert!(NodeId::generate().as_str().starts_with("node_"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn roundtrips_through_string() {
        let id = MemberId::generate();
        let back = MemberId::new(id.as_str());
        assert_eq!(id, back);
    }
}
