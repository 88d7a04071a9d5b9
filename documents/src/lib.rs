//! Document attachment.
//!
//! An uploaded artifact binds to exactly one scope, a user or a family
//! member node, and the `public` flag widens visibility to same-family
//! viewers. The boundary composes the two auth predicates with
//! [`Documents::visible_to`] before exposing results.

pub mod error;
pub mod service;

pub use error::DocumentError;
pub use service::{Documents, NewDocument};
