//! Notification Sink and audit log.
//!
//! Both are best-effort outbound surfaces: callers log a failed delivery and
//! continue, so neither can block a login, a validation, or a revocation.
//! Returning an explicit `Result` (instead of detaching the future and
//! dropping the error) keeps the failures visible to callers and to tests.

use serenity::all::{ChannelId, CreateMessage};
use serenity::http::Http;
use std::sync::Arc;

use crate::{error::AppError, model::event::SinkEvent};

/// Outbound webhook to the external automation platform.
pub struct NotificationSink {
    client: reqwest::Client,
    url: Option<String>,
}

impl NotificationSink {
    /// A sink without a configured URL accepts every event as a no-op.
    pub fn new(client: reqwest::Client, url: Option<String>) -> Self {
        Self { client, url }
    }

    pub async fn send(&self, event: &SinkEvent) -> Result<(), AppError> {
        let Some(url) = &self.url else {
            return Ok(());
        };

        let response = self.client.post(url).json(event).send().await?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "notification sink returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Plain-text audit trail in an optional Discord channel.
pub struct AuditLog {
    http: Arc<Http>,
    channel_id: Option<ChannelId>,
}

impl AuditLog {
    pub fn new(http: Arc<Http>, channel_id: Option<u64>) -> Self {
        Self {
            http,
            channel_id: channel_id.map(ChannelId::new),
        }
    }

    pub async fn post(&self, line: &str) -> Result<(), AppError> {
        let Some(channel_id) = self.channel_id else {
            return Ok(());
        };

        channel_id
            .send_message(&self.http, CreateMessage::new().content(line))
            .await?;

        Ok(())
    }
}
