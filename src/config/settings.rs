use std::env;
use std::path::PathBuf;

const DEFAULT_GATE_CONFIG_PATH: &str = "gate.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    /// When set, slash commands are registered for this guild only
    pub guild_id: Option<u64>,
    /// Path to the gate configuration JSON file
    pub gate_config_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| "DISCORD_TOKEN environment variable not set")?;

        let guild_id = env::var("GUILD_ID")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let gate_config_path = env::var("GATE_CONFIG")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GATE_CONFIG_PATH));

        Ok(Self {
            discord_token,
            guild_id,
            gate_config_path,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            discord_token: "test-token".into(),
            guild_id: None,
            gate_config_path: PathBuf::from(DEFAULT_GATE_CONFIG_PATH),
        }
    }
}
