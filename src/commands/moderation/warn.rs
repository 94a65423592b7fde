use chrono::Utc;
use poise::serenity_prelude::User;

use crate::bot::data::{Context, Warning};
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::discord_timestamp;

/// Warn a user
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS"
)]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The user to warn"] user: User,
    #[description = "Reason for the warning"]
    #[rest]
    reason: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    ctx.data().add_warning(
        guild_id.get(),
        user.id.get(),
        Warning {
            reason: reason.clone(),
            moderator_id: ctx.author().id.get(),
            issued_at: Utc::now(),
        },
    );

    tracing::info!(
        "User {} warned by {} (reason: {})",
        user.id,
        ctx.author().id,
        reason
    );

    ctx.send(
        poise::CreateReply::default()
            .content(format!(
                "Warning issued to {}\nReason: {}",
                user.tag(),
                reason
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// List the warnings issued to a user
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MODERATE_MEMBERS"
)]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "The user to check warnings for"] user: User,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let warnings = ctx.data().warnings_for(guild_id.get(), user.id.get());

    let description = if warnings.is_empty() {
        format!("{} has no warnings this session.", user.tag())
    } else {
        warnings
            .iter()
            .enumerate()
            .map(|(i, w)| warning_line(i, w))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let embed = embeds::info_embed()
        .title(format!("Warnings for {}", user.tag()))
        .description(description);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

fn warning_line(index: usize, w: &Warning) -> String {
    format!(
        "{}. {} - <@{}> at {}",
        index + 1,
        w.reason,
        w.moderator_id,
        discord_timestamp(w.issued_at.timestamp(), 'F')
    )
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    #[test]
    fn warning_lines_are_numbered_plain_ascii() {
        let line = warning_line(
            0,
            &Warning {
                reason: "spam".into(),
                moderator_id: 7,
                issued_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            },
        );

        assert_eq!(line, "1. spam - <@7> at <t:1700000000:F>");
        assert!(line.is_ascii());
    }
}
