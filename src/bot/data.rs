use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::config::{GateConfig, Settings};
use crate::utils::cooldown::CooldownTracker;

/// A warning issued by a moderator, kept in memory for the session.
#[derive(Debug, Clone)]
pub struct Warning {
    pub reason: String,
    pub moderator_id: u64,
    pub issued_at: DateTime<Utc>,
}

/// Shared data available to all commands and handlers
pub struct Data {
    pub settings: Settings,
    pub gate: GateConfig,
    /// Per-user submission locks: user_id -> mutex held for the duration of
    /// one code submission's read-modify-write cycle against the log channel.
    submission_locks: DashMap<u64, Arc<Mutex<()>>>,
    /// Command cooldown tracker
    pub cooldowns: CooldownTracker,
    /// Warnings issued this session: (guild_id, user_id) -> warnings
    warnings: DashMap<(u64, u64), Vec<Warning>>,
}

impl Data {
    pub fn new(settings: Settings, gate: GateConfig) -> Self {
        let cooldowns = CooldownTracker::new(gate.cooldowns.clone());
        Self {
            settings,
            gate,
            submission_locks: DashMap::new(),
            cooldowns,
            warnings: DashMap::new(),
        }
    }

    /// Get (or create) the submission lock for a user. Two submissions from
    /// the same user must not interleave between the store read and write.
    pub fn submission_lock(&self, user_id: u64) -> Arc<Mutex<()>> {
        self.submission_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Record a warning against a user
    pub fn add_warning(&self, guild_id: u64, user_id: u64, warning: Warning) {
        self.warnings
            .entry((guild_id, user_id))
            .or_default()
            .push(warning);
    }

    /// Get all warnings for a user in a guild
    pub fn warnings_for(&self, guild_id: u64, user_id: u64) -> Vec<Warning> {
        self.warnings
            .get(&(guild_id, user_id))
            .map(|w| w.value().clone())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("submission_locks_count", &self.submission_locks.len())
            .field("warned_users_count", &self.warnings.len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;

    fn test_data() -> Data {
        Data::new(Settings::for_tests(), GateConfig::default())
    }

    #[test]
    fn submission_lock_is_stable_per_user() {
        let data = test_data();
        let a = data.submission_lock(1);
        let b = data.submission_lock(1);
        assert!(Arc::ptr_eq(&a, &b));

        let c = data.submission_lock(2);
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn warnings_accumulate_per_guild_user() {
        let data = test_data();
        data.add_warning(
            10,
            20,
            Warning {
                reason: "spam".into(),
                moderator_id: 1,
                issued_at: Utc::now(),
            },
        );
        data.add_warning(
            10,
            20,
            Warning {
                reason: "more spam".into(),
                moderator_id: 1,
                issued_at: Utc::now(),
            },
        );

        assert_eq!(data.warnings_for(10, 20).len(), 2);
        assert!(data.warnings_for(10, 21).is_empty());
        assert!(data.warnings_for(11, 20).is_empty());
    }
}
