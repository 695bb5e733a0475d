use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use attendly_core::{DepartmentId, EmployeeId};

use crate::Role;

/// Session credential claims model (transport-agnostic).
///
/// This is the minimal set of claims the system expects once a session
/// credential has been decoded/verified by the signature layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — the employee this session belongs to.
    pub sub: EmployeeId,

    /// Role granted for the lifetime of the session.
    pub role: Role,

    /// Department context, if the employee is assigned to one.
    pub department_id: Option<DepartmentId>,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("credential has expired")]
    Expired,

    #[error("credential not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid credential time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate session claims.
///
/// Note: this validates the *claims* only. Signature verification/decoding
/// lives in [`crate::SessionAuthenticator`].
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), CredentialError> {
    if claims.expires_at <= claims.issued_at {
        return Err(CredentialError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(CredentialError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(CredentialError::Expired);
    }
    Ok(())
}
