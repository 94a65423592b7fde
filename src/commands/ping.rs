use crate::bot::data::Context;
use crate::bot::error::Error;

/// Check that the bot is responsive
#[poise::command(slash_command, prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let start = std::time::Instant::now();
    let reply = ctx.say("Pinging...").await?;
    let latency = start.elapsed().as_millis();

    reply
        .edit(
            ctx,
            poise::CreateReply::default().content(format!("Pong! 🏓\nRound-trip: {}ms", latency)),
        )
        .await?;

    Ok(())
}
