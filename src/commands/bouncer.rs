use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::components::bouncer_panel;

/// Deploy the gate panel in the current channel
#[poise::command(
    slash_command,
    prefix_command,
    rename = "buildbouncer",
    required_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn buildbouncer(ctx: Context<'_>) -> Result<(), Error> {
    let panel = bouncer_panel::create_panel(&ctx.data().gate);

    ctx.channel_id()
        .send_message(&ctx.serenity_context().http, panel)
        .await?;

    ctx.send(
        poise::CreateReply::default()
            .content("Bouncer has been created!")
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
