use std::str::FromStr;

use crate::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_PORT: u16 = 3000;

/// What the revocation endpoint does to a target user.
///
/// Stripping the entitlement roles is the default; banning is the legacy
/// destructive variant kept behind an explicit opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokePolicy {
    StripRoles,
    Ban,
}

impl FromStr for RevokePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roles" => Ok(Self::StripRoles),
            "ban" => Ok(Self::Ban),
            _ => Err(()),
        }
    }
}

/// Application configuration, read once at startup and passed into every
/// component at construction. No component reads the environment directly.
pub struct Config {
    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,
    pub discord_bot_token: String,

    pub guild_id: u64,
    pub base_role_id: Option<u64>,
    pub vip_role_id: u64,

    pub ticket_category_id: Option<u64>,
    pub support_role_id: Option<u64>,
    pub ticket_panel_channel_id: Option<u64>,
    pub audit_channel_id: Option<u64>,

    pub webhook_secret: String,
    pub sink_webhook_url: Option<String>,
    pub validation_webhook_url: String,
    pub revoke_policy: RevokePolicy,
    pub port: u16,

    pub discord_auth_url: String,
    pub discord_token_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_client_id: require("DISCORD_CLIENT_ID")?,
            discord_client_secret: require("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: require("DISCORD_REDIRECT_URL")?,
            discord_bot_token: require("DISCORD_BOT_TOKEN")?,
            guild_id: require_id("GUILD_ID")?,
            base_role_id: optional_id("BASE_ROLE_ID")?,
            vip_role_id: require_id("VIP_ROLE_ID")?,
            ticket_category_id: optional_id("TICKET_CATEGORY_ID")?,
            support_role_id: optional_id("SUPPORT_ROLE_ID")?,
            ticket_panel_channel_id: optional_id("TICKET_PANEL_CHANNEL_ID")?,
            audit_channel_id: optional_id("AUDIT_CHANNEL_ID")?,
            webhook_secret: require("WEBHOOK_SECRET")?,
            sink_webhook_url: std::env::var("SINK_WEBHOOK_URL").ok(),
            validation_webhook_url: require("VALIDATION_WEBHOOK_URL")?,
            revoke_policy: revoke_policy()?,
            port: port()?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn require_id(name: &str) -> Result<u64, ConfigError> {
    parse_id(name, &require(name)?)
}

fn optional_id(name: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(Some(parse_id(name, &value)?)),
        _ => Ok(None),
    }
}

/// Parses a Discord snowflake from its environment representation.
fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn revoke_policy() -> Result<RevokePolicy, ConfigError> {
    match std::env::var("REVOKE_POLICY") {
        Ok(value) => value
            .parse::<RevokePolicy>()
            .map_err(|_| ConfigError::InvalidValue {
                name: "REVOKE_POLICY".to_string(),
                value,
            }),
        Err(_) => Ok(RevokePolicy::StripRoles),
    }
}

fn port() -> Result<u16, ConfigError> {
    match std::env::var("PORT") {
        Ok(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            name: "PORT".to_string(),
            value,
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Tests snowflake parsing from environment values.
    ///
    /// Expected: Ok for digits, InvalidValue otherwise
    #[test]
    fn parses_snowflakes() {
        assert_eq!(parse_id("GUILD_ID", "123456789").unwrap(), 123456789);
        assert!(parse_id("GUILD_ID", "not-a-number").is_err());
        assert!(parse_id("GUILD_ID", "").is_err());
    }

    /// Tests revocation policy parsing.
    ///
    /// Expected: "roles" and "ban" recognized, anything else rejected
    #[test]
    fn parses_revoke_policy() {
        assert_eq!("roles".parse::<RevokePolicy>(), Ok(RevokePolicy::StripRoles));
        assert_eq!("ban".parse::<RevokePolicy>(), Ok(RevokePolicy::Ban));
        assert!("kick".parse::<RevokePolicy>().is_err());
    }
}
