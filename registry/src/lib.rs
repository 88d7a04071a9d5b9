//! Member registry — accounts, sign-in, the verification status machine, and
//! family membership transitions.

pub mod credential;
pub mod error;
pub mod service;

pub use error::RegistryError;
pub use service::{DashboardStats, MemberRegistry, NewMember, StatusPolicy};
