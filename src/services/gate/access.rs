//! The access gate: single entry point for a submitted code.
//!
//! The interaction is acknowledged before this runs (deferred ephemeral
//! response in the modal handler); everything here edits that
//! acknowledgment. Submissions from the same user are serialized through a
//! per-user lock so two in-flight guesses cannot both read the same count
//! and lose an update.

use std::sync::Arc;

use serenity::all::{
    ChannelId, Context, CreateMessage, EditInteractionResponse, GuildId, Member,
    ModalInteraction, User,
};
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::gate::{attempt_message, GENERIC_FAILURE};
use crate::services::gate::escalation;
use crate::services::gate::store::ChannelStore;
use crate::services::gate::tracker::{AttemptTracker, FailureOutcome};
use crate::utils::roles::find_role_by_name;

/// Process one code submission end to end.
pub async fn handle_code_submission(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
    code: &str,
) -> Result<(), Error> {
    let user_id = modal.user.id;

    // One submission per user at a time, held across the whole
    // read-modify-write cycle against the log channel.
    let lock = data.submission_lock(user_id.get());
    let _guard = lock.lock().await;

    let guild_id = modal
        .guild_id
        .ok_or_else(|| Error::custom("code submitted outside a guild"))?;
    let member = modal
        .member
        .as_ref()
        .ok_or_else(|| Error::custom("modal interaction carries no member"))?;

    // Unreachable log channel is a hard stop: nothing persisted, no lockout.
    let log_channel = ChannelId::new(data.gate.log_channel_id);
    if let Err(e) = log_channel.to_channel(ctx).await {
        error!(
            "Log channel {} unreachable, rejecting submission from {}: {:?}",
            log_channel, user_id, e
        );
        edit_reply(ctx, modal, GENERIC_FAILURE).await?;
        return Ok(());
    }

    let store = ChannelStore::new(ctx.http.clone(), log_channel);
    let tracker = AttemptTracker::new(store);

    match data.gate.grant_for(code) {
        Some(grant) => {
            // Valid code: end the session first so the record is terminal
            // even if role assignment goes sideways.
            tracker.resolve_success(user_id).await?;

            let granted = grant_roles(ctx, data, guild_id, member, &grant.roles).await?;
            log_successful_access(ctx, log_channel, &modal.user, &granted).await;

            info!("User {} verified with access code", user_id);
            edit_reply(
                ctx,
                modal,
                &format!("WELCOME I GAVE YOU THE ROLE: {}", granted.join(", ")),
            )
            .await?;
        }
        None => match tracker.record_failure(user_id, code).await? {
            FailureOutcome::Active(record) => {
                edit_reply(ctx, modal, &attempt_message(record.count())).await?;
            }
            FailureOutcome::LockedOut(record) => {
                escalation::escalate(ctx, data, modal, guild_id, &tracker, &record).await?;
            }
        },
    }

    Ok(())
}

/// Grant the named roles to a member and strip the unverified role.
/// Returns the names actually granted.
pub async fn grant_roles(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    member: &Member,
    role_names: &[String],
) -> Result<Vec<String>, Error> {
    let mut role_ids = Vec::new();
    let mut granted = Vec::new();

    for name in role_names {
        match find_role_by_name(&ctx.http, guild_id, name).await? {
            Some(role) => {
                role_ids.push(role.id);
                granted.push(role.name);
            }
            None => warn!("Configured role {:?} not found in guild {}", name, guild_id),
        }
    }

    if role_ids.is_empty() {
        return Err(Error::RoleNotFound(role_names.join(", ")));
    }

    member.add_roles(&ctx.http, &role_ids).await?;

    // Verified members lose the holding-pen role.
    if let Some(unverified) =
        find_role_by_name(&ctx.http, guild_id, &data.gate.unverified_role).await?
    {
        if member.roles.contains(&unverified.id) {
            member.remove_role(&ctx.http, unverified.id).await?;
        }
    }

    Ok(granted)
}

/// Audit-log a successful verification. Best-effort.
async fn log_successful_access(
    ctx: &Context,
    log_channel: ChannelId,
    user: &User,
    granted: &[String],
) {
    let embed = embeds::success_embed()
        .title("✅ Successful Code Access")
        .description("User successfully accessed with code.")
        .field("User", format!("{} ({})", user.tag(), user.id), false)
        .field("Roles Assigned", granted.join(", "), false)
        .timestamp(serenity::all::Timestamp::now());

    if let Err(e) = log_channel
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        error!("Failed to log successful access: {:?}", e);
    }
}

/// Update the deferred acknowledgment with the final outcome.
pub async fn edit_reply(ctx: &Context, modal: &ModalInteraction, content: &str) -> Result<(), Error> {
    modal
        .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
        .await?;
    Ok(())
}
