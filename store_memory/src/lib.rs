//! In-memory storage backend — thread-safe, with the same uniqueness
//! constraints a document store would enforce.
//!
//! Persistence engine internals are out of scope for Kinship; this backend is
//! the reference implementation of the `kinship-store` traits and the test
//! double for every service crate.

mod directory;

pub use directory::MemoryDirectory;
