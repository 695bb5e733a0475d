use thiserror::Error;

/// Authentication/authorization failure taxonomy.
///
/// Messages are deliberately generic: none of them reveals *why* a credential
/// was rejected beyond its category.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Credential absent, malformed, bad signature, or expired.
    #[error("authentication required")]
    Unauthenticated,

    /// Credential verified, but the referenced identity no longer exists.
    ///
    /// Distinct from a signature failure: the credential may simply be stale
    /// relative to a deleted employee record.
    #[error("identity not found")]
    IdentityNotFound,

    /// Authenticated, but the role is not in the operation's allow-list.
    #[error("access denied")]
    Forbidden,
}
