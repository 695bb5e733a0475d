//! `attendly-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. The only seam
//! to the outside world is the [`IdentityStore`] trait, implemented elsewhere.

pub mod claims;
pub mod error;
pub mod gate;
pub mod identity;
pub mod roles;
pub mod session;

pub use claims::{CredentialError, SessionClaims, validate_claims};
pub use error::AuthError;
pub use gate::RoleGate;
pub use identity::Identity;
pub use roles::Role;
pub use session::{IdentityStore, SessionAuthenticator};
