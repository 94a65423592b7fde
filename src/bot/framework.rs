use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use tracing::{error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands;
use crate::config::{GateConfig, Settings};
use crate::handlers::event_handler::event_handler;

/// Text-command prefix, kept from the bot's pre-slash era
pub const COMMAND_PREFIX: &str = "//";

pub async fn run(settings: Settings, gate: GateConfig) -> Result<(), Error> {
    let data = Arc::new(Data::new(settings.clone(), gate));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Explicit command table, populated at startup
            commands: commands::all(),
            // Every command also answers to the legacy `//` text prefix
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.to_string()),
                ..Default::default()
            },
            command_check: Some(|ctx| {
                Box::pin(async move {
                    let command = ctx.command().name.clone();
                    if let Some(remaining) =
                        ctx.data().cooldowns.check(ctx.author().id.get(), &command)
                    {
                        ctx.send(
                            poise::CreateReply::default()
                                .content(format!(
                                    "Please wait {} more second(s) before using this command again.",
                                    remaining
                                ))
                                .ephemeral(true),
                        )
                        .await?;
                        return Ok(false);
                    }
                    Ok(true)
                })
            }),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
                            let _ = ctx.say(format!("Invalid argument: {}", error)).await;
                        }
                        poise::FrameworkError::UnknownCommand { .. } => {
                            // Unrecognized `//` text; stay quiet
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                // Register commands per-guild when GUILD_ID is set (instant),
                // globally otherwise (takes up to an hour to propagate)
                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);

                        // Delete stale global commands first to avoid duplicates
                        match ctx.http.get_global_commands().await {
                            Ok(global_commands) => {
                                for cmd in &global_commands {
                                    if let Err(e) =
                                        ctx.http.delete_global_command(cmd.id).await
                                    {
                                        warn!(
                                            "Failed to delete global command {}: {:?}",
                                            cmd.name, e
                                        );
                                    }
                                }
                            }
                            Err(e) => {
                                warn!("Could not check for global commands: {:?}", e);
                            }
                        }

                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            guild_id,
                        )
                        .await
                        .map_err(Error::Serenity)?;

                        info!(
                            "Registered {} commands for guild {}",
                            framework.options().commands.len(),
                            guild_id
                        );
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await
                            .map_err(Error::Serenity)?;

                        info!(
                            "Registered {} commands globally",
                            framework.options().commands.len()
                        );
                    }
                }

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MODERATION
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}
