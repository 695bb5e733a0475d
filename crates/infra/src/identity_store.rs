use std::collections::HashMap;
use std::sync::RwLock;

use attendly_auth::{Identity, IdentityStore};
use attendly_core::EmployeeId;

/// In-memory identity store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    identities: RwLock<HashMap<EmployeeId, Identity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an identity.
    pub fn upsert(&self, identity: Identity) {
        self.identities
            .write()
            .expect("identity store lock poisoned")
            .insert(identity.id, identity);
    }

    pub fn remove(&self, id: EmployeeId) {
        self.identities
            .write()
            .expect("identity store lock poisoned")
            .remove(&id);
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn find_by_id(&self, id: EmployeeId) -> Option<Identity> {
        self.identities
            .read()
            .expect("identity store lock poisoned")
            .get(&id)
            .cloned()
    }
}
