use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::moderation::actions;
use crate::utils::formatting::truncate;

/// Kick a user from the server
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "KICK_MEMBERS",
    required_bot_permissions = "KICK_MEMBERS"
)]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "The user to kick"] user: User,
    #[description = "Reason for the kick"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    ctx.defer_ephemeral().await?;

    actions::kick_member(
        &ctx.serenity_context().http,
        guild_id,
        user.id,
        &truncate(&reason, 512),
    )
    .await?;

    ctx.say(format!(
        "Successfully kicked {}\nReason: {}",
        user.tag(),
        reason
    ))
    .await?;

    Ok(())
}
