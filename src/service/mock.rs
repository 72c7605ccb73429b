//! In-memory doubles for the external collaborators.
//!
//! Compiled for tests only. The directory and validator record every call so
//! tests can assert on exact mutation sequences.

use serenity::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{
    config::{Config, RevokePolicy},
    error::AppError,
    model::validation::{ValidationRequest, Verdict},
    service::{directory::MembershipDirectory, ticket::io::TicketIo, validation::ValidationAuthority},
};

/// Config with fixed test identifiers: guild 1, base role 2, VIP role 3.
pub fn test_config(revoke_policy: RevokePolicy) -> Config {
    Config {
        discord_client_id: "client-id".to_string(),
        discord_client_secret: "client-secret".to_string(),
        discord_redirect_url: "https://gate.example.com/callback".to_string(),
        discord_bot_token: "bot-token".to_string(),
        guild_id: 1,
        base_role_id: Some(2),
        vip_role_id: 3,
        ticket_category_id: None,
        support_role_id: None,
        ticket_panel_channel_id: None,
        audit_channel_id: None,
        webhook_secret: "super-secret".to_string(),
        sink_webhook_url: None,
        validation_webhook_url: "https://sink.example.com/validate".to_string(),
        revoke_policy,
        port: 3000,
        discord_auth_url: "https://discord.com/oauth2/authorize".to_string(),
        discord_token_url: "https://discord.com/api/oauth2/token".to_string(),
    }
}

/// Membership Directory double recording every mutation.
#[derive(Default)]
pub struct MockDirectory {
    pub joins: Mutex<Vec<u64>>,
    pub granted: Mutex<Vec<(u64, u64)>>,
    pub revoked: Mutex<Vec<(u64, u64)>>,
    pub banned: Mutex<Vec<(u64, String)>>,
    pub fail_grant: bool,
    pub fail_revoke: bool,
}

impl MockDirectory {
    pub fn mutation_count(&self) -> usize {
        self.joins.lock().unwrap().len()
            + self.granted.lock().unwrap().len()
            + self.revoked.lock().unwrap().len()
            + self.banned.lock().unwrap().len()
    }
}

#[async_trait]
impl MembershipDirectory for MockDirectory {
    async fn join_guild(&self, user_id: u64, _access_token: &str) -> Result<(), AppError> {
        self.joins.lock().unwrap().push(user_id);
        Ok(())
    }

    async fn grant_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        if self.fail_grant {
            return Err(AppError::InternalError("grant refused".to_string()));
        }
        self.granted.lock().unwrap().push((user_id, role_id));
        Ok(())
    }

    async fn revoke_role(&self, user_id: u64, role_id: u64) -> Result<(), AppError> {
        if self.fail_revoke {
            return Err(AppError::InternalError("revoke refused".to_string()));
        }
        self.revoked.lock().unwrap().push((user_id, role_id));
        Ok(())
    }

    async fn ban(&self, user_id: u64, reason: &str) -> Result<(), AppError> {
        self.banned
            .lock()
            .unwrap()
            .push((user_id, reason.to_string()));
        Ok(())
    }
}

/// Validation Authority double replaying a scripted sequence of verdicts.
#[derive(Default)]
pub struct MockValidator {
    pub requests: Mutex<Vec<ValidationRequest>>,
    verdicts: Mutex<VecDeque<Result<Verdict, AppError>>>,
}

impl MockValidator {
    pub fn approving() -> Self {
        Self::replying(vec![Ok(Verdict {
            approved: true,
            reply: Some("ok".to_string()),
        })])
    }

    pub fn rejecting(reply: Option<&str>) -> Self {
        Self::replying(vec![Ok(Verdict {
            approved: false,
            reply: reply.map(str::to_string),
        })])
    }

    pub fn failing() -> Self {
        Self::replying(vec![Err(AppError::InternalError(
            "authority unreachable".to_string(),
        ))])
    }

    pub fn replying(verdicts: Vec<Result<Verdict, AppError>>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            verdicts: Mutex::new(verdicts.into()),
        }
    }
}

#[async_trait]
impl ValidationAuthority for MockValidator {
    async fn validate(&self, request: &ValidationRequest) -> Result<Verdict, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.verdicts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Verdict {
                approved: false,
                reply: None,
            }))
    }
}

/// Ticket IO double recording notices, prompts, and closes.
#[derive(Default)]
pub struct RecordingIo {
    pub notices: Mutex<Vec<String>>,
    pub confirm_prompts: Mutex<Vec<String>>,
    pub retry_prompts: Mutex<Vec<String>>,
    pub retired: AtomicUsize,
    pub closed: AtomicUsize,
}

#[async_trait]
impl TicketIo for RecordingIo {
    async fn send_notice(&self, text: &str) -> Result<(), AppError> {
        self.notices.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn prompt_confirmation(&self, email: &str) -> Result<(), AppError> {
        self.confirm_prompts.lock().unwrap().push(email.to_string());
        Ok(())
    }

    async fn prompt_retry(&self, reply: &str) -> Result<(), AppError> {
        self.retry_prompts.lock().unwrap().push(reply.to_string());
        Ok(())
    }

    async fn retire_prompt(&self) -> Result<(), AppError> {
        self.retired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close_ticket(&self) -> Result<(), AppError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
