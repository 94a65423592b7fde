//! Lockout escalation: alert the administrators, say goodbye, kick.
//!
//! Ordering matters. The user-facing message goes out before the kick
//! because removal can invalidate the ability to message them, and the
//! alert lands before the kick so admins are not surprised by a silent
//! removal. Alerting is best-effort; containment is mandatory, so a failed
//! alert never blocks the eviction.

use std::sync::Arc;

use serenity::all::{
    ChannelId, Context, CreateMessage, GuildId, ModalInteraction, Timestamp, User,
};
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds::{self, bullet_list, ALERT_DIVIDER};
use crate::constants::gate::EJECTION_NOTICE;
use crate::services::gate::access::edit_reply;
use crate::services::gate::store::{AttemptRecord, AttemptStore};
use crate::services::gate::tracker::AttemptTracker;
use crate::utils::formatting::{discord_timestamp, mention_role};
use crate::utils::roles::find_role_by_name;

const KICK_REASON: &str = "Exceeded maximum code entry attempts";

/// Drive the full lockout sequence for an over-threshold record:
/// alert, ejection notice, kick, then resolve.
///
/// The record is only resolved when the kick succeeds; otherwise it stays
/// active so the next submission re-triggers containment instead of
/// starting a fresh count.
pub async fn escalate<S: AttemptStore>(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
    guild_id: GuildId,
    tracker: &AttemptTracker<S>,
    record: &AttemptRecord,
) -> Result<(), Error> {
    let user = &modal.user;

    // 1. Administrator alert
    if let Err(e) = send_alert(ctx, data, guild_id, user, record).await {
        error!("Failed to send security alert for user {}: {:?}", user.id, e);
    }

    // 2. User-facing ejection notice, while they can still receive it
    if let Err(e) = edit_reply(ctx, modal, EJECTION_NOTICE).await {
        warn!("Failed to deliver ejection notice to {}: {:?}", user.id, e);
    }

    // 3. Eviction
    match guild_id.kick_with_reason(&ctx.http, user.id, KICK_REASON).await {
        Ok(()) => {
            info!(
                "Kicked user {} after {} failed code attempts",
                user.id,
                record.count()
            );
            // 4. Terminal transition, only once containment succeeded
            if let Err(e) = tracker.resolve_lockout(record).await {
                warn!(
                    "Kicked user {} but failed to resolve tracking record: {:?}",
                    user.id, e
                );
            }
        }
        Err(e) => {
            // Over-threshold record left without containment. Loud.
            error!(
                "FAILED TO KICK user {} after lockout; record stays active: {:?}",
                user.id, e
            );
        }
    }

    Ok(())
}

/// Compose and send the structured security alert to the log channel. The
/// admin role mention is skipped when the role cannot be resolved.
async fn send_alert(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    user: &User,
    record: &AttemptRecord,
) -> Result<(), Error> {
    let log_channel = ChannelId::new(data.gate.log_channel_id);

    let first_attempt = record
        .first_attempt_at()
        .map(|t| discord_timestamp(t.timestamp(), 'F'))
        .unwrap_or_else(|| "unknown".to_string());

    let failed_codes = record
        .entries
        .iter()
        .map(|e| format!("`{}` at {}", e.code, discord_timestamp(e.submitted_at.timestamp(), 'T')))
        .collect::<Vec<_>>()
        .join("\n");

    let mut alert = embeds::error_embed()
        .title("🚨 Security Alert: Multiple Failed Access Attempts")
        .description("User has been kicked for exceeding maximum code attempts.")
        .field(
            "User Information",
            format!("Name: {}\nID: {}", user.tag(), user.id),
            false,
        )
        .field(
            "Account Created",
            discord_timestamp(user.created_at().unix_timestamp(), 'F'),
            false,
        )
        .field("First Attempt", first_attempt, false)
        .field("Failed Codes", failed_codes, false)
        .timestamp(Timestamp::now());

    if let Ok(member) = guild_id.member(ctx, user.id).await {
        if let Some(joined) = member.joined_at {
            alert = alert.field(
                "Joined Server",
                discord_timestamp(joined.unix_timestamp(), 'F'),
                false,
            );
        }
    }

    let details = embeds::error_embed()
        .title("🔒 Additional Security Details")
        .description("User has been automatically kicked for security reasons.")
        .field(
            "Action Required",
            bullet_list(&[
                "Review the failed attempts",
                "Check for potential security threats",
                "Consider updating access codes if necessary",
            ]),
            false,
        )
        .timestamp(Timestamp::now());

    let banner = match find_role_by_name(&ctx.http, guild_id, &data.gate.admin_role).await {
        Ok(Some(role)) => format!(
            "🚨 {} **SECURITY ALERT** 🚨\n{}",
            mention_role(role.id),
            ALERT_DIVIDER
        ),
        Ok(None) => {
            warn!(
                "Admin role {:?} not found; sending alert without mention",
                data.gate.admin_role
            );
            format!("🚨 **SECURITY ALERT** 🚨\n{}", ALERT_DIVIDER)
        }
        Err(e) => {
            warn!("Failed to resolve admin role: {:?}", e);
            format!("🚨 **SECURITY ALERT** 🚨\n{}", ALERT_DIVIDER)
        }
    };

    log_channel
        .send_message(
            &ctx.http,
            CreateMessage::new().content(banner).embeds(vec![alert, details]),
        )
        .await?;

    Ok(())
}
