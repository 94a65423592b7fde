//! Thin wrappers over the guild-management API for the moderation commands.

use chrono::Utc;
use serenity::all::{ChannelId, EditMember, GetMessages, GuildId, Http, UserId};
use tracing::{debug, info};

use crate::bot::error::Error;

/// Ban a user, deleting none of their message history.
pub async fn ban_member(
    http: &Http,
    guild_id: GuildId,
    user_id: UserId,
    reason: &str,
) -> Result<(), Error> {
    guild_id.ban_with_reason(http, user_id, 0, reason).await?;
    info!("Banned user {} (reason: {})", user_id, reason);
    Ok(())
}

/// Lift a ban by user id.
pub async fn unban_member(http: &Http, guild_id: GuildId, user_id: UserId) -> Result<(), Error> {
    guild_id.unban(http, user_id).await?;
    info!("Unbanned user {}", user_id);
    Ok(())
}

/// Kick a member from the guild.
pub async fn kick_member(
    http: &Http,
    guild_id: GuildId,
    user_id: UserId,
    reason: &str,
) -> Result<(), Error> {
    guild_id.kick_with_reason(http, user_id, reason).await?;
    info!("Kicked user {} (reason: {})", user_id, reason);
    Ok(())
}

/// Time a member out for the given number of minutes.
pub async fn timeout_member(
    http: &Http,
    guild_id: GuildId,
    user_id: UserId,
    minutes: u32,
    reason: &str,
) -> Result<(), Error> {
    let until = Utc::now() + chrono::Duration::minutes(minutes as i64);

    guild_id
        .edit_member(
            http,
            user_id,
            EditMember::new()
                .disable_communication_until(until.to_rfc3339())
                .audit_log_reason(reason),
        )
        .await?;

    info!(
        "Timed out user {} for {} minutes (reason: {})",
        user_id, minutes, reason
    );
    Ok(())
}

/// Remove an active timeout.
pub async fn clear_timeout(
    http: &Http,
    guild_id: GuildId,
    user_id: UserId,
    reason: &str,
) -> Result<(), Error> {
    guild_id
        .edit_member(
            http,
            user_id,
            EditMember::new()
                .enable_communication()
                .audit_log_reason(reason),
        )
        .await?;

    info!("Removed timeout from user {} (reason: {})", user_id, reason);
    Ok(())
}

/// Bulk-delete the most recent `amount` messages in a channel.
/// Returns how many were targeted.
pub async fn purge_messages(
    http: &Http,
    channel_id: ChannelId,
    amount: u8,
) -> Result<usize, Error> {
    let messages = channel_id
        .messages(http, GetMessages::new().limit(amount))
        .await?;

    let ids: Vec<_> = messages.iter().map(|m| m.id).collect();
    let count = ids.len();

    match count {
        0 => {}
        1 => channel_id.delete_message(http, ids[0]).await?,
        _ => channel_id.delete_messages(http, ids).await?,
    }

    debug!("Purged {} messages from channel {}", count, channel_id);
    Ok(count)
}
