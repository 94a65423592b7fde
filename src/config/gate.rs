use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::bot::error::Error;

/// An access code and the roles it grants on an exact match.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeGrant {
    pub code: String,
    pub roles: Vec<String>,
}

/// A role-selection button on the gate panel.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleButton {
    pub id: String,
    pub label: String,
    pub roles: Vec<String>,
}

/// Static gate configuration, loaded once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GateConfig {
    /// Channel used both as audit trail and as attempt-record storage
    pub log_channel_id: u64,
    /// Role mentioned in security alerts
    pub admin_role: String,
    /// Role auto-assigned on join and removed once the member is verified
    pub unverified_role: String,
    /// Channel for join greetings (optional)
    #[serde(default)]
    pub welcome_channel_id: Option<u64>,
    /// Code table: exact code string -> roles to grant
    #[serde(default)]
    pub codes: Vec<CodeGrant>,
    /// Buttons shown on the gate panel
    #[serde(default)]
    pub role_buttons: Vec<RoleButton>,
    /// Per-command cooldown overrides in seconds
    #[serde(default)]
    pub cooldowns: HashMap<String, u64>,
}

impl GateConfig {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        let config: GateConfig = serde_json::from_str(&contents)?;

        if config.log_channel_id == 0 {
            return Err(Error::Config("log_channel_id must be set".into()));
        }
        if config.admin_role.is_empty() {
            return Err(Error::Config("admin_role must be set".into()));
        }

        Ok(config)
    }

    /// Look up a submitted code. Comparison is exact-string; no partial or
    /// fuzzy matching.
    pub fn grant_for(&self, code: &str) -> Option<&CodeGrant> {
        self.codes.iter().find(|c| c.code == code)
    }

    pub fn button(&self, id: &str) -> Option<&RoleButton> {
        self.role_buttons.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GateConfig {
        serde_json::from_str(json).expect("config should parse")
    }

    #[test]
    fn parses_full_config() {
        let config = parse(
            r#"{
                "log_channel_id": 123,
                "admin_role": "ADMIN",
                "unverified_role": "RANDO",
                "welcome_channel_id": 456,
                "codes": [{"code": "letmein", "roles": ["CRYPTO"]}],
                "role_buttons": [{"id": "crypto", "label": "Crypto", "roles": ["CRYPTO"]}],
                "cooldowns": {"ping": 10}
            }"#,
        );

        assert_eq!(config.log_channel_id, 123);
        assert_eq!(config.welcome_channel_id, Some(456));
        assert_eq!(config.codes.len(), 1);
        assert_eq!(config.cooldowns.get("ping"), Some(&10));
    }

    #[test]
    fn grant_lookup_is_exact_match() {
        let config = parse(
            r#"{
                "log_channel_id": 1,
                "admin_role": "ADMIN",
                "unverified_role": "RANDO",
                "codes": [{"code": "letmein", "roles": ["CRYPTO"]}]
            }"#,
        );

        assert!(config.grant_for("letmein").is_some());
        assert!(config.grant_for("letmei").is_none());
        assert!(config.grant_for("letmein ").is_none());
        assert!(config.grant_for("LETMEIN").is_none());

        let grant = config.grant_for("letmein").unwrap();
        assert_eq!(grant.roles, vec!["CRYPTO".to_string()]);
    }

    #[test]
    fn button_lookup_by_id() {
        let config = parse(
            r#"{
                "log_channel_id": 1,
                "admin_role": "ADMIN",
                "unverified_role": "RANDO",
                "role_buttons": [{"id": "suits", "label": "Suits", "roles": ["SUITS"]}]
            }"#,
        );

        assert_eq!(config.button("suits").unwrap().label, "Suits");
        assert!(config.button("crypto").is_none());
    }
}
