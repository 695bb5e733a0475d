//! `attendly-attendance` — the attendance-token protocol.
//!
//! An admin mints a short-lived, tamper-evident, confidential token (rendered
//! as a QR payload); any authenticated employee redeems it within the
//! validity window to prove physical presence at issuance time.
//!
//! Minting is stateless on purpose: freshness is verified purely from the
//! timestamp embedded in the token, not from a server-side lookup table.

pub mod codec;
pub mod error;
pub mod payload;
pub mod presence;
pub mod service;

pub use codec::{CryptoError, TokenCodec};
pub use error::AttendanceError;
pub use payload::AttendancePayload;
pub use presence::{PresenceEvent, PresenceEventStore, PresenceStatus, StoreError};
pub use service::{AttendancePolicy, AttendanceService};
