use std::sync::Arc;

use chrono::{DateTime, Utc};

use attendly_auth::{Identity, Role, RoleGate};

use crate::{
    AttendanceError, AttendancePayload, PresenceEvent, PresenceEventStore, PresenceStatus,
    TokenCodec,
};

/// Freshness policy for attendance tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendancePolicy {
    /// Maximum allowed age between mint and redemption.
    pub validity_window_ms: i64,

    /// How far in the future an embedded timestamp may sit before the token
    /// is treated as a tampering anomaly rather than "very fresh".
    pub clock_skew_tolerance_ms: i64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            validity_window_ms: 5 * 60 * 1_000,
            clock_skew_tolerance_ms: 5_000,
        }
    }
}

/// Orchestrates the token codec: minting (admin-only) and redemption (any
/// authenticated employee).
///
/// Holds no mutable state — the codec key is derived once at construction and
/// the service keeps no record of outstanding tokens, so calls may run fully
/// in parallel.
pub struct AttendanceService {
    codec: TokenCodec,
    presence: Arc<dyn PresenceEventStore>,
    policy: AttendancePolicy,
    issuer_tag: String,
    mint_gate: RoleGate,
}

impl AttendanceService {
    pub fn new(
        codec: TokenCodec,
        presence: Arc<dyn PresenceEventStore>,
        policy: AttendancePolicy,
        issuer_tag: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            presence,
            policy,
            issuer_tag: issuer_tag.into(),
            mint_gate: RoleGate::restricted_to([Role::Admin]),
        }
    }

    /// Mint a fresh attendance token on behalf of `identity`.
    ///
    /// Admin-only. The token embeds `now` and a fresh nonce; nothing is
    /// stored server-side.
    pub fn mint(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, AttendanceError> {
        self.mint_gate
            .check(identity.role)
            .map_err(|_| AttendanceError::Forbidden)?;

        let payload = AttendancePayload::generate(&self.issuer_tag, now);
        let token = self.codec.mint(&payload)?;

        tracing::info!(minted_by = %identity.id, "attendance token minted");
        Ok(token)
    }

    /// Redeem `token` for `identity`, recording a presence event on success.
    ///
    /// Returns the decoded payload so the caller can display a confirmation.
    pub fn redeem(
        &self,
        identity: &Identity,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AttendancePayload, AttendanceError> {
        let payload = self.codec.redeem(token)?;

        let age_ms = now.timestamp_millis() - payload.issued_at_ms;
        if age_ms < -self.policy.clock_skew_tolerance_ms {
            // Embedded timestamp is in the future: tampering anomaly, not
            // "very fresh".
            return Err(AttendanceError::InvalidToken);
        }
        if age_ms > self.policy.validity_window_ms {
            return Err(AttendanceError::Expired);
        }

        let event = PresenceEvent {
            employee_id: identity.id,
            recorded_at: now,
            status: PresenceStatus::In,
            token_nonce: payload.nonce.clone(),
        };
        self.record_with_retry(event)?;

        tracing::info!(employee_id = %identity.id, age_ms, "attendance token redeemed");
        Ok(payload)
    }

    /// Record a presence event, retrying once on a store failure.
    ///
    /// A store fault is the one transient failure worth a local retry; it is
    /// surfaced as [`AttendanceError::PersistenceFailed`] after the second
    /// attempt, never swallowed.
    fn record_with_retry(&self, event: PresenceEvent) -> Result<(), AttendanceError> {
        match self.presence.record(event.clone()) {
            Ok(()) => Ok(()),
            Err(first) => {
                tracing::warn!(error = %first, "presence store write failed, retrying once");
                self.presence.record(event).map_err(|second| {
                    tracing::error!(error = %second, "presence store write failed after retry");
                    AttendanceError::PersistenceFailed
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use attendly_core::EmployeeId;
    use crate::StoreError;

    /// In-memory store that can be told to fail its first N writes.
    #[derive(Default)]
    struct RecordingStore {
        events: Mutex<Vec<PresenceEvent>>,
        failures_remaining: AtomicUsize,
        attempts: AtomicUsize,
    }

    impl RecordingStore {
        fn failing(times: usize) -> Self {
            Self {
                failures_remaining: AtomicUsize::new(times),
                ..Self::default()
            }
        }
    }

    impl PresenceEventStore for RecordingStore {
        fn record(&self, event: PresenceEvent) -> Result<(), StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if self
                .failures_remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(StoreError("injected fault".to_string()));
            }
            self.events.lock().unwrap().push(event);
            Ok(())
        }

        fn history_for(
            &self,
            employee_id: EmployeeId,
            limit: usize,
        ) -> Result<Vec<PresenceEvent>, StoreError> {
            let mut events: Vec<_> = self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.employee_id == employee_id)
                .cloned()
                .collect();
            events.reverse();
            events.truncate(limit);
            Ok(events)
        }

        fn all(&self) -> Result<Vec<PresenceEvent>, StoreError> {
            let mut events = self.events.lock().unwrap().clone();
            events.reverse();
            Ok(events)
        }
    }

    fn identity(role: Role) -> Identity {
        Identity {
            id: EmployeeId::new(),
            display_name: "Sam Rivera".to_string(),
            role,
            department_id: None,
        }
    }

    fn service(store: Arc<RecordingStore>) -> AttendanceService {
        AttendanceService::new(
            TokenCodec::new(b"service-test-secret").unwrap(),
            store,
            AttendancePolicy::default(),
            "TEST-01",
        )
    }

    #[test]
    fn admin_mints_and_employee_redeems() {
        let store = Arc::new(RecordingStore::default());
        let svc = service(store.clone());
        let now = Utc::now();

        let token = svc.mint(&identity(Role::Admin), now).unwrap();

        let redeemer = identity(Role::Employee);
        let payload = svc.redeem(&redeemer, &token, now).unwrap();
        assert_eq!(payload.issued_at_ms, now.timestamp_millis());
        assert_eq!(payload.issuer_tag, "TEST-01");

        let events = store.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].employee_id, redeemer.id);
        assert_eq!(events[0].status, PresenceStatus::In);
        assert_eq!(events[0].token_nonce, payload.nonce);
    }

    #[test]
    fn non_admin_mint_is_forbidden() {
        let svc = service(Arc::new(RecordingStore::default()));
        let now = Utc::now();

        for role in [Role::Manager, Role::Employee] {
            assert_eq!(
                svc.mint(&identity(role), now),
                Err(AttendanceError::Forbidden)
            );
        }
    }

    #[test]
    fn redemption_inside_the_window_succeeds() {
        let svc = service(Arc::new(RecordingStore::default()));
        let minted_at = Utc::now();
        let token = svc.mint(&identity(Role::Admin), minted_at).unwrap();

        let just_in_time = minted_at + Duration::milliseconds(299_999);
        assert!(svc.redeem(&identity(Role::Employee), &token, just_in_time).is_ok());
    }

    #[test]
    fn redemption_past_the_window_expires() {
        let svc = service(Arc::new(RecordingStore::default()));
        let minted_at = Utc::now();
        let token = svc.mint(&identity(Role::Admin), minted_at).unwrap();

        let too_late = minted_at + Duration::milliseconds(300_001);
        assert_eq!(
            svc.redeem(&identity(Role::Employee), &token, too_late),
            Err(AttendanceError::Expired)
        );
    }

    #[test]
    fn future_timestamp_beyond_tolerance_is_invalid_not_fresh() {
        let svc = service(Arc::new(RecordingStore::default()));
        let now = Utc::now();

        // Minted "ten seconds from now" — outside the skew tolerance.
        let token = svc
            .mint(&identity(Role::Admin), now + Duration::seconds(10))
            .unwrap();
        assert_eq!(
            svc.redeem(&identity(Role::Employee), &token, now),
            Err(AttendanceError::InvalidToken)
        );
    }

    #[test]
    fn small_clock_skew_is_tolerated() {
        let svc = service(Arc::new(RecordingStore::default()));
        let now = Utc::now();

        let token = svc
            .mint(&identity(Role::Admin), now + Duration::seconds(3))
            .unwrap();
        assert!(svc.redeem(&identity(Role::Employee), &token, now).is_ok());
    }

    #[test]
    fn malformed_tokens_are_invalid() {
        let svc = service(Arc::new(RecordingStore::default()));
        let redeemer = identity(Role::Employee);
        let now = Utc::now();

        for junk in ["", "notcolon", "abc:"] {
            assert_eq!(
                svc.redeem(&redeemer, junk, now),
                Err(AttendanceError::InvalidToken),
                "input: {junk:?}"
            );
        }
    }

    #[test]
    fn transient_store_fault_is_retried_once() {
        let store = Arc::new(RecordingStore::failing(1));
        let svc = service(store.clone());
        let now = Utc::now();

        let token = svc.mint(&identity(Role::Admin), now).unwrap();
        assert!(svc.redeem(&identity(Role::Employee), &token, now).is_ok());

        assert_eq!(store.attempts.load(Ordering::SeqCst), 2);
        assert_eq!(store.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn persistent_store_fault_surfaces_after_retry() {
        let store = Arc::new(RecordingStore::failing(2));
        let svc = service(store.clone());
        let now = Utc::now();

        let token = svc.mint(&identity(Role::Admin), now).unwrap();
        assert_eq!(
            svc.redeem(&identity(Role::Employee), &token, now),
            Err(AttendanceError::PersistenceFailed)
        );
        assert_eq!(store.attempts.load(Ordering::SeqCst), 2);
    }
}
