use serenity::all::{RoleId, UserId};

/// Format a user mention
pub fn mention_user(user_id: UserId) -> String {
    format!("<@{}>", user_id)
}

/// Format a channel mention
pub fn mention_channel(channel_id: u64) -> String {
    format!("<#{}>", channel_id)
}

/// Format a role mention
pub fn mention_role(role_id: RoleId) -> String {
    format!("<@&{}>", role_id)
}

/// Format a unix timestamp as a Discord rendered timestamp.
/// Styles: `F` full date/time, `T` time only, `R` relative.
pub fn discord_timestamp(unix_secs: i64, style: char) -> String {
    format!("<t:{}:{}>", unix_secs, style)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_discord_markup() {
        assert_eq!(discord_timestamp(1700000000, 'F'), "<t:1700000000:F>");
        assert_eq!(discord_timestamp(1700000000, 'T'), "<t:1700000000:T>");
    }

    #[test]
    fn truncate_preserves_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("a longer reason string", 10), "a longe...");
    }
}
