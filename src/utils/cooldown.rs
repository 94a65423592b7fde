use std::collections::HashMap;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::constants::gate::DEFAULT_COMMAND_COOLDOWN_SECS;

/// Per-user command cooldowns. Durations come from the gate config, with a
/// small default for anything unlisted.
pub struct CooldownTracker {
    last_used: DashMap<(u64, String), Instant>,
    durations: HashMap<String, u64>,
}

impl CooldownTracker {
    pub fn new(durations: HashMap<String, u64>) -> Self {
        Self {
            last_used: DashMap::new(),
            durations,
        }
    }

    fn duration_secs(&self, command: &str) -> u64 {
        self.durations
            .get(command)
            .copied()
            .unwrap_or(DEFAULT_COMMAND_COOLDOWN_SECS)
    }

    /// Check and record a command use. Returns the remaining seconds when
    /// the user is still cooling down, otherwise records this use.
    pub fn check(&self, user_id: u64, command: &str) -> Option<u64> {
        let secs = self.duration_secs(command);
        if secs == 0 {
            return None;
        }

        let key = (user_id, command.to_string());
        let window = Duration::from_secs(secs);

        let remaining = self.last_used.get(&key).and_then(|last| {
            let elapsed = last.elapsed();
            if elapsed < window {
                Some((window - elapsed).as_secs().max(1))
            } else {
                None
            }
        });

        if remaining.is_none() {
            self.last_used.insert(key, Instant::now());
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker_with(command: &str, secs: u64) -> CooldownTracker {
        let mut durations = HashMap::new();
        durations.insert(command.to_string(), secs);
        CooldownTracker::new(durations)
    }

    #[test]
    fn second_use_within_window_is_blocked() {
        let tracker = tracker_with("ban", 60);
        assert_eq!(tracker.check(1, "ban"), None);
        let remaining = tracker.check(1, "ban").expect("should be cooling down");
        assert!(remaining >= 1 && remaining <= 60);
    }

    #[test]
    fn zero_duration_never_blocks() {
        let tracker = tracker_with("ping", 0);
        assert_eq!(tracker.check(1, "ping"), None);
        assert_eq!(tracker.check(1, "ping"), None);
    }

    #[test]
    fn users_and_commands_are_tracked_independently() {
        let tracker = tracker_with("ban", 60);
        assert_eq!(tracker.check(1, "ban"), None);
        // Different user, same command
        assert_eq!(tracker.check(2, "ban"), None);
        // Same user, different command (falls back to default duration)
        assert_eq!(tracker.check(1, "kick"), None);
        // First pair still cooling down
        assert!(tracker.check(1, "ban").is_some());
    }
}
