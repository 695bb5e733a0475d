use thiserror::Error;

use crate::codec::CryptoError;

/// Attendance-protocol failure taxonomy.
///
/// Every variant maps to one generic client-facing message; none reveals
/// which internal step failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceError {
    /// Token malformed, undecryptable, or carrying an implausible timestamp.
    ///
    /// All decode failures collapse into this single variant so callers get
    /// no oracle about *why* decoding failed.
    #[error("invalid attendance token")]
    InvalidToken,

    /// Token decoded but its validity window has elapsed.
    #[error("attendance token expired")]
    Expired,

    /// Caller's role is not permitted to mint.
    #[error("access denied")]
    Forbidden,

    /// The presence event store failed even after a retry.
    #[error("failed to record presence event")]
    PersistenceFailed,

    /// Internal encrypt/serialize failure. Practically unreachable.
    #[error("internal error")]
    Internal,
}

impl From<CryptoError> for AttendanceError {
    fn from(_: CryptoError) -> Self {
        AttendanceError::Internal
    }
}
