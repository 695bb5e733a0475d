use chrono::{DateTime, Utc};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};

/// Number of random bytes in a payload nonce.
const NONCE_BYTES: usize = 16;

/// The structured plaintext encrypted inside an attendance token.
///
/// `issued_at_ms` is the sole basis for freshness checking at redemption.
/// The nonce is freshly random per mint — never reused — so two tokens minted
/// in the same millisecond still differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePayload {
    /// Mint timestamp, milliseconds since the Unix epoch.
    pub issued_at_ms: i64,

    /// 16 random bytes, hex-encoded.
    pub nonce: String,

    /// Constant identifying the deployment that minted the token.
    pub issuer_tag: String,
}

impl AttendancePayload {
    /// Build a payload for a token minted at `now`, with a fresh nonce.
    pub fn generate(issuer_tag: impl Into<String>, now: DateTime<Utc>) -> Self {
        let mut nonce = [0u8; NONCE_BYTES];
        OsRng.fill_bytes(&mut nonce);

        Self {
            issued_at_ms: now.timestamp_millis(),
            nonce: hex::encode(nonce),
            issuer_tag: issuer_tag.into(),
        }
    }
}
