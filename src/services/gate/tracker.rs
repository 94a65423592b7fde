//! The attempt state machine: decides whether a failed submission starts a
//! session, extends it, or trips the lockout threshold.

use chrono::Utc;
use serenity::all::UserId;

use crate::bot::error::Error;
use crate::constants::gate::MAX_ATTEMPTS;
use crate::services::gate::store::{AttemptRecord, AttemptStore, Resolution};

/// Result of recording one failed submission.
#[derive(Debug)]
pub enum FailureOutcome {
    /// Session continues; reply with the attempt-count taunt.
    Active(AttemptRecord),
    /// Threshold reached; escalate and eject.
    LockedOut(AttemptRecord),
}

/// State machine over an [`AttemptStore`]. Holds no state of its own: every
/// decision is made against what the store currently says, so counts survive
/// process restarts.
pub struct AttemptTracker<S> {
    store: S,
}

impl<S: AttemptStore> AttemptTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a wrong code. Creates a record on the first failure of a
    /// session, appends on subsequent ones, and reports lockout once the
    /// count reaches the threshold.
    ///
    /// An unresolved record already at the threshold (left behind when a
    /// prior eviction failed) is not appended to; it reports lockout again
    /// so containment is retried without the count ever exceeding the
    /// threshold.
    pub async fn record_failure(
        &self,
        user_id: UserId,
        code: &str,
    ) -> Result<FailureOutcome, Error> {
        let now = Utc::now();

        let record = match self.store.find_active(user_id).await? {
            None => self.store.create(user_id, code, now).await?,
            Some(existing) if existing.count() >= MAX_ATTEMPTS => existing,
            Some(existing) => self.store.append(&existing, code, now).await?,
        };

        if record.count() >= MAX_ATTEMPTS {
            Ok(FailureOutcome::LockedOut(record))
        } else {
            Ok(FailureOutcome::Active(record))
        }
    }

    /// A valid code ends the session. No-op when the user has no active
    /// record (a first-try success never created one).
    pub async fn resolve_success(&self, user_id: UserId) -> Result<(), Error> {
        if let Some(record) = self.store.find_active(user_id).await? {
            self.store.resolve(&record, Resolution::Success).await?;
        }
        Ok(())
    }

    /// Terminate a locked-out session after the member has been removed.
    pub async fn resolve_lockout(&self, record: &AttemptRecord) -> Result<(), Error> {
        self.store.resolve(record, Resolution::Lockout).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serenity::all::MessageId;
    use tokio::sync::Mutex;
    use tokio_test::assert_ok;

    use super::*;
    use crate::services::gate::store::AttemptEntry;

    /// In-memory stand-in for the channel-backed store.
    #[derive(Default)]
    struct MemoryStore {
        /// (record, resolved)
        records: Mutex<Vec<(AttemptRecord, bool)>>,
        next_id: AtomicU64,
    }

    impl MemoryStore {
        async fn resolved_count(&self) -> usize {
            self.records
                .lock()
                .await
                .iter()
                .filter(|(_, resolved)| *resolved)
                .count()
        }

        async fn total_records(&self) -> usize {
            self.records.lock().await.len()
        }
    }

    #[async_trait]
    impl AttemptStore for MemoryStore {
        async fn find_active(&self, user_id: UserId) -> Result<Option<AttemptRecord>, Error> {
            Ok(self
                .records
                .lock()
                .await
                .iter()
                .rev()
                .find(|(r, resolved)| !resolved && r.user_id == user_id)
                .map(|(r, _)| r.clone()))
        }

        async fn create(
            &self,
            user_id: UserId,
            code: &str,
            submitted_at: DateTime<Utc>,
        ) -> Result<AttemptRecord, Error> {
            let record = AttemptRecord {
                user_id,
                message_id: MessageId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
                entries: vec![AttemptEntry {
                    code: code.to_string(),
                    submitted_at,
                }],
            };
            self.records.lock().await.push((record.clone(), false));
            Ok(record)
        }

        async fn append(
            &self,
            record: &AttemptRecord,
            code: &str,
            submitted_at: DateTime<Utc>,
        ) -> Result<AttemptRecord, Error> {
            let mut records = self.records.lock().await;
            let (stored, _) = records
                .iter_mut()
                .find(|(r, _)| r.message_id == record.message_id)
                .expect("append target should exist");
            stored.entries.push(AttemptEntry {
                code: code.to_string(),
                submitted_at,
            });
            Ok(stored.clone())
        }

        async fn resolve(
            &self,
            record: &AttemptRecord,
            _outcome: Resolution,
        ) -> Result<(), Error> {
            let mut records = self.records.lock().await;
            let (_, resolved) = records
                .iter_mut()
                .find(|(r, _)| r.message_id == record.message_id)
                .expect("resolve target should exist");
            *resolved = true;
            Ok(())
        }
    }

    const USER: UserId = UserId::new(42);

    #[tokio::test]
    async fn first_failure_creates_a_single_entry_record() {
        let tracker = AttemptTracker::new(MemoryStore::default());

        match tracker.record_failure(USER, "nope").await.unwrap() {
            FailureOutcome::Active(record) => {
                assert_eq!(record.count(), 1);
                assert_eq!(record.entries[0].code, "nope");
            }
            other => panic!("expected Active, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn serial_failures_count_up_in_submission_order() {
        let tracker = AttemptTracker::new(MemoryStore::default());

        let codes = ["a", "b", "c", "d"];
        let mut last = None;
        for code in codes {
            last = Some(tracker.record_failure(USER, code).await.unwrap());
        }

        match last.unwrap() {
            FailureOutcome::Active(record) => {
                assert_eq!(record.count(), 4);
                let seen: Vec<&str> =
                    record.entries.iter().map(|e| e.code.as_str()).collect();
                assert_eq!(seen, codes);
            }
            other => panic!("expected Active at 4 failures, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fifth_failure_locks_out_with_exactly_five_entries() {
        let tracker = AttemptTracker::new(MemoryStore::default());

        for _ in 0..4 {
            tracker.record_failure(USER, "wrong").await.unwrap();
        }

        match tracker.record_failure(USER, "wrong").await.unwrap() {
            FailureOutcome::LockedOut(record) => assert_eq!(record.count(), MAX_ATTEMPTS),
            other => panic!("expected LockedOut, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn success_resolves_and_next_failure_starts_fresh() {
        let store = MemoryStore::default();
        let tracker = AttemptTracker::new(store);

        tracker.record_failure(USER, "miss1").await.unwrap();
        tracker.record_failure(USER, "miss2").await.unwrap();
        tracker.resolve_success(USER).await.unwrap();

        // The old record is terminal; a new session starts at 1.
        match tracker.record_failure(USER, "miss3").await.unwrap() {
            FailureOutcome::Active(record) => {
                assert_eq!(record.count(), 1);
                assert_eq!(record.entries[0].code, "miss3");
            }
            other => panic!("expected fresh Active record, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn success_without_prior_record_is_a_noop() {
        let store = MemoryStore::default();
        tokio_test::assert_ok!(AttemptTracker::new(&store).resolve_success(USER).await);
        assert_eq!(store.total_records().await, 0);
    }

    #[tokio::test]
    async fn lockout_resolution_hides_the_record_from_lookup() {
        let store = MemoryStore::default();
        let tracker = AttemptTracker::new(&store);

        let record = loop {
            if let FailureOutcome::LockedOut(r) =
                tracker.record_failure(USER, "wrong").await.unwrap()
            {
                break r;
            }
        };

        tracker.resolve_lockout(&record).await.unwrap();

        assert!(store.find_active(USER).await.unwrap().is_none());
        assert_eq!(store.resolved_count().await, 1);

        // Fresh state afterwards: count restarts at 1.
        match tracker.record_failure(USER, "again").await.unwrap() {
            FailureOutcome::Active(r) => assert_eq!(r.count(), 1),
            other => panic!("expected fresh record, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unresolved_over_threshold_record_is_never_appended_to() {
        let store = MemoryStore::default();
        let tracker = AttemptTracker::new(&store);

        for _ in 0..5 {
            tracker.record_failure(USER, "wrong").await.unwrap();
        }
        // Eviction failed, so nothing resolved the record. The next failure
        // must re-report lockout without a sixth entry.
        match tracker.record_failure(USER, "wrong again").await.unwrap() {
            FailureOutcome::LockedOut(record) => assert_eq!(record.count(), MAX_ATTEMPTS),
            other => panic!("expected repeated LockedOut, got {:?}", other),
        }
        assert_eq!(store.total_records().await, 1);
    }

    #[tokio::test]
    async fn independent_users_track_independently() {
        let store = MemoryStore::default();
        let tracker = AttemptTracker::new(&store);
        let other = UserId::new(7);

        tracker.record_failure(USER, "x").await.unwrap();
        tracker.record_failure(other, "y").await.unwrap();
        tracker.record_failure(USER, "z").await.unwrap();

        let mine = store.find_active(USER).await.unwrap().unwrap();
        let theirs = store.find_active(other).await.unwrap().unwrap();
        assert_eq!(mine.count(), 2);
        assert_eq!(theirs.count(), 1);
    }
}
