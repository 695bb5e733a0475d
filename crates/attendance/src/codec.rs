use argon2::Argon2;
use chacha20poly1305::{
    Key, XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

use crate::{AttendanceError, AttendancePayload};

/// AEAD nonce width. XChaCha20-Poly1305 takes a 24-byte nonce, wide enough
/// that drawing it randomly per mint is collision-safe.
const AEAD_NONCE_BYTES: usize = 24;

/// Fixed salt for deriving the token key from the process-wide secret.
/// Changing it invalidates every outstanding token.
const KDF_SALT: &[u8] = b"attendly.token.v1";

/// Mint-side failure. Does not carry detail; these paths are practically
/// unreachable once the codec is constructed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    #[error("key derivation failed")]
    KeyDerivation,

    #[error("payload serialization failed")]
    Serialize,

    #[error("encryption failed")]
    Encrypt,
}

/// Symmetric authenticated codec between [`AttendancePayload`] and the opaque
/// transport string `<hex nonce>:<hex ciphertext>`.
///
/// The key is derived once at construction via Argon2id (slow, salted) and
/// cached for the life of the codec — the raw secret is never used as key
/// material directly, and is not retained.
pub struct TokenCodec {
    cipher: XChaCha20Poly1305,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Result<Self, CryptoError> {
        let mut key = [0u8; 32];
        Argon2::default()
            .hash_password_into(secret, KDF_SALT, &mut key)
            .map_err(|_| CryptoError::KeyDerivation)?;

        Ok(Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(&key)),
        })
    }

    /// Encrypt `payload` into an opaque transport string.
    ///
    /// A fresh random nonce is drawn per call and carried alongside the
    /// ciphertext, so minting the same payload twice yields different tokens.
    pub fn mint(&self, payload: &AttendancePayload) -> Result<String, CryptoError> {
        let plaintext = serde_json::to_vec(payload).map_err(|_| CryptoError::Serialize)?;

        let mut nonce = [0u8; AEAD_NONCE_BYTES];
        OsRng.fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(&XNonce::from(nonce), plaintext.as_slice())
            .map_err(|_| CryptoError::Encrypt)?;

        Ok(format!("{}:{}", hex::encode(nonce), hex::encode(ciphertext)))
    }

    /// Decrypt and parse a transport string back into its payload.
    ///
    /// Every failure — bad structure, bad hex, failed authentication, bad
    /// plaintext — surfaces as the same [`AttendanceError::InvalidToken`].
    pub fn redeem(&self, token: &str) -> Result<AttendancePayload, AttendanceError> {
        self.try_decode(token).ok_or(AttendanceError::InvalidToken)
    }

    fn try_decode(&self, token: &str) -> Option<AttendancePayload> {
        let (nonce_hex, ciphertext_hex) = token.split_once(':')?;

        let nonce: [u8; AEAD_NONCE_BYTES] = hex::decode(nonce_hex).ok()?.try_into().ok()?;
        let ciphertext = hex::decode(ciphertext_hex).ok()?;

        let plaintext = self
            .cipher
            .decrypt(&XNonce::from(nonce), ciphertext.as_slice())
            .ok()?;

        serde_json::from_slice(&plaintext).ok()
    }
}
