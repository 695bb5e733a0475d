use crate::{AuthError, Role};

/// Allow-list authorization predicate over [`Role`]s.
///
/// A gate must only be evaluated *after* the session authenticator has
/// resolved an identity; it assumes authentication already happened.
///
/// - No IO
/// - No panics
/// - No side effects beyond the pass/fail decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    allowed: Vec<Role>,
}

impl RoleGate {
    /// Restrict an operation to the given roles.
    pub fn restricted_to(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: roles.into_iter().collect(),
        }
    }

    /// No role restriction beyond authentication.
    ///
    /// This is an explicit constructor rather than a default: an empty
    /// allow-list meaning "any authenticated role" is a design choice, not
    /// permit-by-omission.
    pub fn any_authenticated() -> Self {
        Self { allowed: Vec::new() }
    }

    /// Check whether `role` may pass this gate.
    pub fn check(&self, role: Role) -> Result<(), AuthError> {
        if self.allowed.is_empty() || self.allowed.contains(&role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
