//! Identity and access control for Kinship.
//!
//! A boundary resolves the caller's session token into a [`Principal`]; every
//! scoped operation in the workspace is then gated by exactly two capability
//! predicates, [`Principal::can_access_user_data`] and
//! [`Principal::is_same_family`]. No other crate re-derives authorization.

pub mod error;
pub mod principal;
pub mod session;

pub use error::AuthError;
pub use principal::Principal;
pub use session::{SessionKey, Sessions};
