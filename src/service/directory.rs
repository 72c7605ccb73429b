//! Membership Directory seam.
//!
//! The guild's member, role, and ban state is owned by Discord; this module
//! is the only place the application mutates it. The trait exists so the
//! dialogue engine and the revocation endpoint can be exercised against an
//! in-memory directory in tests.

use serenity::all::{GuildId, RoleId, UserId};
use serenity::async_trait;
use serenity::http::Http;
use std::sync::Arc;

use crate::error::AppError;

#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Adds an authenticated user to the managed guild using their OAuth
    /// access token (requires the `guilds.join` scope).
    async fn join_guild(&self, user_id: u64, access_token: &str) -> Result<(), AppError>;

    async fn grant_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn revoke_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError>;

    async fn ban(&self, user_id: u64, reason: &str) -> Result<(), AppError>;
}

/// Directory implementation backed by the Discord REST API.
///
/// Role and ban mutations go through Serenity's `Http` client authenticated
/// as the bot. The guild-member PUT is issued directly with reqwest since it
/// mixes the user's OAuth access token into the body with the bot's
/// authorization header.
pub struct DiscordDirectory {
    http: Arc<Http>,
    client: reqwest::Client,
    guild_id: GuildId,
    bot_token: String,
}

impl DiscordDirectory {
    pub fn new(http: Arc<Http>, client: reqwest::Client, guild_id: u64, bot_token: String) -> Self {
        Self {
            http,
            client,
            guild_id: GuildId::new(guild_id),
            bot_token,
        }
    }
}

#[async_trait]
impl MembershipDirectory for DiscordDirectory {
    async fn join_guild(&self, user_id: u64, access_token: &str) -> Result<(), AppError> {
        let url = format!(
            "https://discord.com/api/guilds/{}/members/{}",
            self.guild_id, user_id
        );

        let response = self
            .client
            .put(&url)
            .header("Authorization", format!("Bot {}", self.bot_token))
            .json(&serde_json::json!({ "access_token": access_token }))
            .send()
            .await?;

        // 201 on join, 204 when the user was already a member.
        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "guild join for user {} returned {}",
                user_id,
                response.status()
            )));
        }

        Ok(())
    }

    async fn grant_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .add_member_role(
                self.guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("entitlement granted"),
            )
            .await?;

        Ok(())
    }

    async fn revoke_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                self.guild_id,
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("entitlement revoked"),
            )
            .await?;

        Ok(())
    }

    async fn ban(&self, user_id: u64, reason: &str) -> Result<(), AppError> {
        self.http
            .ban_user(self.guild_id, UserId::new(user_id), 0, Some(reason))
            .await?;

        Ok(())
    }
}
