use poise::serenity_prelude::User;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::moderation::actions;
use crate::utils::formatting::truncate;

/// Timeout a user for a number of minutes
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    required_bot_permissions = "MODERATE_MEMBERS"
)]
pub async fn timeout(
    ctx: Context<'_>,
    #[description = "The user to timeout"] user: User,
    #[description = "Duration in minutes"]
    #[min = 1]
    #[max = 40320]
    duration: u32,
    #[description = "Reason for the timeout"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    ctx.defer_ephemeral().await?;

    actions::timeout_member(
        &ctx.serenity_context().http,
        guild_id,
        user.id,
        duration,
        &truncate(&reason, 512),
    )
    .await?;

    ctx.say(format!(
        "Successfully timed out {} for {} minutes\nReason: {}",
        user.tag(),
        duration,
        reason
    ))
    .await?;

    Ok(())
}

/// Remove an active timeout from a user
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS",
    required_bot_permissions = "MODERATE_MEMBERS"
)]
pub async fn untimeout(
    ctx: Context<'_>,
    #[description = "The user to remove timeout from"] user: User,
    #[description = "Reason for removing the timeout"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    ctx.defer_ephemeral().await?;

    actions::clear_timeout(
        &ctx.serenity_context().http,
        guild_id,
        user.id,
        &truncate(&reason, 512),
    )
    .await?;

    ctx.say(format!(
        "Successfully removed timeout from {}\nReason: {}",
        user.tag(),
        reason
    ))
    .await?;

    Ok(())
}
