//! `attendly-infra` — infrastructure implementations of the domain seams.
//!
//! Currently in-memory only (dev/tests); SQL-backed implementations slot in
//! behind the same traits.

pub mod identity_store;
pub mod presence_store;

pub use identity_store::InMemoryIdentityStore;
pub use presence_store::InMemoryPresenceStore;
