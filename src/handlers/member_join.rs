use std::sync::Arc;

use serenity::all::{ChannelId, Context, CreateMessage, Member};
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::utils::formatting::mention_user;
use crate::utils::roles::find_role_by_name;

/// Tag a new member with the unverified role and greet them at the door.
pub async fn handle_member_join(
    ctx: &Context,
    data: &Arc<Data>,
    member: &Member,
) -> Result<(), Error> {
    match find_role_by_name(&ctx.http, member.guild_id, &data.gate.unverified_role).await? {
        Some(role) => {
            member.add_role(&ctx.http, role.id).await?;
            info!(
                "Assigned {} role to new member {}",
                data.gate.unverified_role, member.user.id
            );
        }
        None => {
            error!(
                "Unverified role {:?} not found in guild {}",
                data.gate.unverified_role, member.guild_id
            );
        }
    }

    // Greeting is optional and best-effort
    if let Some(channel_id) = data.gate.welcome_channel_id {
        let embed = embeds::standard_embed()
            .title("👋 Welcome")
            .description(format!(
                "{} just arrived. Press a button at the door or enter the secret code to get in.",
                mention_user(member.user.id)
            ));

        if let Err(e) = ChannelId::new(channel_id)
            .send_message(&ctx.http, CreateMessage::new().embed(embed))
            .await
        {
            warn!("Failed to send welcome message: {:?}", e);
        }
    }

    Ok(())
}
