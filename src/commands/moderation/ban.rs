use poise::serenity_prelude::{User, UserId};

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::moderation::actions;
use crate::utils::formatting::truncate;

/// Ban a user from the server
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn ban(
    ctx: Context<'_>,
    #[description = "The user to ban"] user: User,
    #[description = "Reason for the ban"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let reason = reason.unwrap_or_else(|| "No reason provided".to_string());

    ctx.defer_ephemeral().await?;

    actions::ban_member(
        &ctx.serenity_context().http,
        guild_id,
        user.id,
        &truncate(&reason, 512),
    )
    .await?;

    ctx.say(format!(
        "Successfully banned {}\nReason: {}",
        user.tag(),
        reason
    ))
    .await?;

    Ok(())
}

/// Unban a user by their ID
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "BAN_MEMBERS",
    required_bot_permissions = "BAN_MEMBERS"
)]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "The ID of the user to unban"] user_id: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let user_id: u64 = user_id
        .trim()
        .parse()
        .map_err(|_| Error::custom("Invalid user ID"))?;

    ctx.defer_ephemeral().await?;

    actions::unban_member(&ctx.serenity_context().http, guild_id, UserId::new(user_id)).await?;

    ctx.say(format!("Successfully unbanned user with ID: {}", user_id))
        .await?;

    Ok(())
}
