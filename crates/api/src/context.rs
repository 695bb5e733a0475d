use attendly_auth::Identity;

/// Authenticated identity context for a request.
///
/// Inserted by the auth middleware after verification and threaded
/// explicitly into handlers — downstream code receives the resolved identity
/// as a value rather than mutating shared request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    identity: Identity,
}

impl IdentityContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}
