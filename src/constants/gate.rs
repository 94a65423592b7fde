/// Failed code submissions before the member is kicked
pub const MAX_ATTEMPTS: usize = 5;

/// How far back the log channel is scanned for an active tracking record.
/// Older active records fall out of the window and become invisible.
pub const MESSAGE_SCAN_LIMIT: u8 = 100;

/// Default command cooldown when the gate config has no override
pub const DEFAULT_COMMAND_COOLDOWN_SECS: u64 = 3;

/// Generic reply when a submission cannot be processed
pub const GENERIC_FAILURE: &str =
    "An error occurred while processing your code. Please contact an administrator.";

/// Reply shown to the member being ejected
pub const EJECTION_NOTICE: &str =
    "❌❌❌ GOOODBYEEEE ❌❌❌\nYou have exceeded the maximum number of attempts.";

/// The user-facing reply for a failed attempt. Pure function of the attempt
/// count; the submitted code text never changes the message.
pub fn attempt_message(count: usize) -> String {
    let taunt = match count {
        0 | 1 => "❌ NOPE TRY AGAIN ❌",
        2 => "❌ SWING AND A MISS ❌",
        3 => "❌ BOOOOOO ❌",
        4 => "❌ YOU GOT ONE MORE CHANCE AFTER THIS ONE ❌",
        _ => return EJECTION_NOTICE.to_string(),
    };
    format!("{}\nAttempt {}/{}", taunt, count, MAX_ATTEMPTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_taunts_for_attempts_one_through_four() {
        let messages: Vec<String> = (1..=4).map(attempt_message).collect();
        for (i, msg) in messages.iter().enumerate() {
            assert!(
                msg.contains(&format!("Attempt {}/5", i + 1)),
                "message {} should carry its attempt number",
                i + 1
            );
        }
        // All four taunts differ
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(messages[i], messages[j]);
            }
        }
    }

    #[test]
    fn fifth_attempt_and_beyond_is_the_ejection_notice() {
        assert_eq!(attempt_message(5), EJECTION_NOTICE);
        assert_eq!(attempt_message(6), EJECTION_NOTICE);
        assert_eq!(attempt_message(100), EJECTION_NOTICE);
    }
}
