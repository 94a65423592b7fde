use serenity::all::{GuildId, Http, Role};

use crate::bot::error::Error;

/// Resolve a guild role by its display name.
pub async fn find_role_by_name(
    http: &Http,
    guild_id: GuildId,
    name: &str,
) -> Result<Option<Role>, Error> {
    let roles = guild_id.roles(http).await?;
    Ok(roles.into_values().find(|r| r.name == name))
}
