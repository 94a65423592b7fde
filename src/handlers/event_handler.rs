use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{error, info};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::handlers::{interaction, member_join};

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot ready as {}", data_about_bot.user.name);
        }

        FullEvent::GuildMemberAddition { new_member } => {
            if let Err(e) = member_join::handle_member_join(ctx, data, new_member).await {
                error!(
                    "Member join handler error for {}: {:?}",
                    new_member.user.id, e
                );
            }
        }

        FullEvent::InteractionCreate { interaction } => {
            // Poise handles ApplicationCommand (slash commands) automatically.
            // We only handle Component and Modal interactions here.
            match interaction {
                serenity::Interaction::Component(_) | serenity::Interaction::Modal(_) => {
                    if let Err(e) = interaction::handle_interaction(ctx, data, interaction).await {
                        error!("Component/Modal interaction handler error: {:?}", e);
                    }
                }
                _ => {}
            }
        }

        _ => {}
    }

    Ok(())
}
