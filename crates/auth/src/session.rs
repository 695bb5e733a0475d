use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use attendly_core::EmployeeId;

use crate::{AuthError, Identity, SessionClaims, validate_claims};

/// Lookup seam into the external identity store.
///
/// The authenticator only needs point reads; persistence of employees is
/// someone else's concern.
pub trait IdentityStore: Send + Sync {
    fn find_by_id(&self, id: EmployeeId) -> Option<Identity>;
}

/// Verifies bearer session credentials and resolves them to an [`Identity`].
///
/// The signing secret is injected at construction time (never read from the
/// environment at call time), so the authenticator is testable with fixed
/// keys. Verification is pure CPU work; the only IO is the identity lookup.
pub struct SessionAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
    identities: Arc<dyn IdentityStore>,
}

impl SessionAuthenticator {
    pub fn new(secret: &[u8], identities: Arc<dyn IdentityStore>) -> Self {
        // Claims carry RFC3339 datetimes rather than numeric `exp`/`iat`;
        // expiry is checked deterministically by `validate_claims`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            identities,
        }
    }

    /// Verify `bearer` and resolve the identity it references.
    ///
    /// Fails [`AuthError::Unauthenticated`] on any malformed/forged/expired
    /// credential and [`AuthError::IdentityNotFound`] when the credential is
    /// valid but the employee is gone. The raw credential is never logged.
    pub fn authenticate(&self, bearer: &str, now: DateTime<Utc>) -> Result<Identity, AuthError> {
        let claims = jsonwebtoken::decode::<SessionClaims>(bearer, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthenticated)?;

        validate_claims(&claims, now).map_err(|_| AuthError::Unauthenticated)?;

        match self.identities.find_by_id(claims.sub) {
            Some(identity) => Ok(identity),
            None => {
                tracing::debug!(employee_id = %claims.sub, "session references a missing identity");
                Err(AuthError::IdentityNotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};
    use std::collections::HashMap;

    use crate::Role;

    struct FixedStore(HashMap<EmployeeId, Identity>);

    impl IdentityStore for FixedStore {
        fn find_by_id(&self, id: EmployeeId) -> Option<Identity> {
            self.0.get(&id).cloned()
        }
    }

    const SECRET: &[u8] = b"test-secret";

    fn identity(role: Role) -> Identity {
        Identity {
            id: EmployeeId::new(),
            display_name: "Avery Quinn".to_string(),
            role,
            department_id: None,
        }
    }

    fn store_with(identity: &Identity) -> Arc<dyn IdentityStore> {
        Arc::new(FixedStore(HashMap::from([(identity.id, identity.clone())])))
    }

    fn encode(claims: &SessionClaims, secret: &[u8]) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn claims_for(id: EmployeeId, expires_in: Duration) -> SessionClaims {
        let now = Utc::now();
        SessionClaims {
            sub: id,
            role: Role::Employee,
            department_id: None,
            issued_at: now - Duration::minutes(1),
            expires_at: now + expires_in,
        }
    }

    #[test]
    fn valid_credential_resolves_identity() {
        let id = identity(Role::Manager);
        let auth = SessionAuthenticator::new(SECRET, store_with(&id));
        let token = encode(&claims_for(id.id, Duration::minutes(10)), SECRET);

        let resolved = auth.authenticate(&token, Utc::now()).unwrap();
        assert_eq!(resolved, id);
    }

    #[test]
    fn garbage_credential_is_unauthenticated() {
        let id = identity(Role::Employee);
        let auth = SessionAuthenticator::new(SECRET, store_with(&id));

        for junk in ["", "garbage", "a.b", "a.b.c.d"] {
            assert_eq!(
                auth.authenticate(junk, Utc::now()),
                Err(AuthError::Unauthenticated),
                "input: {junk:?}"
            );
        }
    }

    #[test]
    fn wrong_secret_is_unauthenticated() {
        let id = identity(Role::Admin);
        let auth = SessionAuthenticator::new(SECRET, store_with(&id));
        let token = encode(&claims_for(id.id, Duration::minutes(10)), b"other-secret");

        assert_eq!(
            auth.authenticate(&token, Utc::now()),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn expired_credential_is_unauthenticated() {
        let id = identity(Role::Employee);
        let auth = SessionAuthenticator::new(SECRET, store_with(&id));
        let token = encode(&claims_for(id.id, Duration::seconds(-30)), SECRET);

        assert_eq!(
            auth.authenticate(&token, Utc::now()),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn deleted_identity_is_soft_failure() {
        let id = identity(Role::Employee);
        // Store does not contain the employee referenced by the credential.
        let auth = SessionAuthenticator::new(
            SECRET,
            Arc::new(FixedStore(HashMap::new())),
        );
        let token = encode(&claims_for(id.id, Duration::minutes(10)), SECRET);

        assert_eq!(
            auth.authenticate(&token, Utc::now()),
            Err(AuthError::IdentityNotFound)
        );
    }
}
