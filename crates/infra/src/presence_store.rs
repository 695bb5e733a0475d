use std::sync::RwLock;

use attendly_attendance::{PresenceEvent, PresenceEventStore, StoreError};
use attendly_core::EmployeeId;

/// In-memory append-only presence event store.
///
/// Intended for tests/dev. Does not enforce at-most-once redemption; a SQL
/// backend that wants it can add a uniqueness constraint on
/// `(employee_id, token_nonce)`.
#[derive(Debug, Default)]
pub struct InMemoryPresenceStore {
    events: RwLock<Vec<PresenceEvent>>,
}

impl InMemoryPresenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresenceEventStore for InMemoryPresenceStore {
    fn record(&self, event: PresenceEvent) -> Result<(), StoreError> {
        self.events
            .write()
            .map_err(|_| StoreError("lock poisoned".to_string()))?
            .push(event);
        Ok(())
    }

    fn history_for(
        &self,
        employee_id: EmployeeId,
        limit: usize,
    ) -> Result<Vec<PresenceEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError("lock poisoned".to_string()))?;

        // Insertion order is chronological; listings are newest first.
        let mut matching: Vec<_> = events
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .cloned()
            .collect();
        matching.reverse();
        matching.truncate(limit);
        Ok(matching)
    }

    fn all(&self) -> Result<Vec<PresenceEvent>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError("lock poisoned".to_string()))?;

        let mut all = events.clone();
        all.reverse();
        Ok(all)
    }
}
