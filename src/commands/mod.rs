use std::sync::Arc;

use crate::bot::data::Data;
use crate::bot::error::Error;

pub mod bouncer;
pub mod help;
pub mod moderation;
pub mod ping;

/// The full command table. Every command is exposed both as a slash command
/// and as a `//`-prefixed text command.
pub fn all() -> Vec<poise::Command<Arc<Data>, Error>> {
    vec![
        bouncer::buildbouncer(),
        ping::ping(),
        help::help(),
        moderation::ban::ban(),
        moderation::ban::unban(),
        moderation::kick::kick(),
        moderation::timeout::timeout(),
        moderation::timeout::untimeout(),
        moderation::purge::purge(),
        moderation::warn::warn(),
        moderation::warn::warnings(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_exposed_on_both_surfaces() {
        let commands = all();
        assert_eq!(commands.len(), 11);

        for command in commands {
            assert!(
                command.slash_action.is_some(),
                "{} is missing a slash variant",
                command.name
            );
            assert!(
                command.prefix_action.is_some(),
                "{} is missing a prefix variant",
                command.name
            );
        }
    }
}
