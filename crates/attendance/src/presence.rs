use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use attendly_core::EmployeeId;

/// Direction/status tag of a presence event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PresenceStatus {
    In,
    Out,
}

/// A recorded proof of physical presence, produced by a successful token
/// redemption.
///
/// `token_nonce` is the nonce of the redeemed token. The core does not
/// enforce at-most-once redemption; a persistence backend that wants it can
/// put a uniqueness constraint on `(employee_id, token_nonce)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEvent {
    pub employee_id: EmployeeId,
    pub recorded_at: DateTime<Utc>,
    pub status: PresenceStatus,
    pub token_nonce: String,
}

/// Presence store operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("presence store failure: {0}")]
pub struct StoreError(pub String);

/// Persistence seam for presence events.
///
/// Implementations own durability and ordering; the contract here is that
/// listing methods return events newest first.
pub trait PresenceEventStore: Send + Sync {
    /// Persist one presence event.
    fn record(&self, event: PresenceEvent) -> Result<(), StoreError>;

    /// Most recent events for one employee, newest first, at most `limit`.
    fn history_for(&self, employee_id: EmployeeId, limit: usize)
    -> Result<Vec<PresenceEvent>, StoreError>;

    /// All events across employees, newest first.
    fn all(&self) -> Result<Vec<PresenceEvent>, StoreError>;
}
