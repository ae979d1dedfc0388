//! Profile and roster storage for the aula-movil school portal client.
//!
//! This crate provides:
//! - The profile store boundary (`ProfileStore`, `UserProfile`) keyed by
//!   the provider-owned user ID
//! - The roster domain the staff screens manage (`Student`, `GradeLevel`,
//!   `DirectoryStore`)
//! - An in-process implementation (`InMemoryDirectory`) that also serves
//!   as the session router's role-resolution hook
//!
//! Everything here is a client-side view over the external database; the
//! backend owns the data.

pub mod error;
pub mod profile;
pub mod roster;
pub mod store;

// Re-export main types at crate root
pub use error::DirectoryError;
pub use profile::UserProfile;
pub use roster::{GradeLevel, NewStudent, Student};
pub use store::{DirectoryStore, InMemoryDirectory, ProfileStore};
