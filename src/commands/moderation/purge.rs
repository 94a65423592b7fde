use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::moderation::actions;

/// Bulk-delete recent messages in this channel
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn purge(
    ctx: Context<'_>,
    #[description = "Number of messages to delete (max 100)"]
    #[min = 1]
    #[max = 100]
    amount: u8,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let deleted = actions::purge_messages(
        &ctx.serenity_context().http,
        ctx.channel_id(),
        amount,
    )
    .await?;

    tracing::info!(
        "Purged {} messages from channel {} (moderator: {})",
        deleted,
        ctx.channel_id(),
        ctx.author().id
    );

    ctx.say(format!("Deleted {} message(s).", deleted)).await?;

    Ok(())
}
