//! Messaging side of a ticket channel.
//!
//! The dialogue engine talks to its channel through this seam: plain
//! notices, the two button prompts, and the final channel deletion. Keeping
//! it behind a trait lets the state machine run against a recording double
//! in tests.

use serenity::all::{
    ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateMessage, EditMessage, MessageId,
};
use serenity::async_trait;
use serenity::http::Http;
use std::sync::{Arc, Mutex};

use crate::error::AppError;

use super::{BUTTON_CANCEL, BUTTON_CONFIRM, BUTTON_CORRECT, BUTTON_RETRY};

#[async_trait]
pub trait TicketIo: Send + Sync {
    async fn send_notice(&self, text: &str) -> Result<(), AppError>;

    /// Shows the Confirm/Correct prompt for a candidate email.
    async fn prompt_confirmation(&self, email: &str) -> Result<(), AppError>;

    /// Shows the Retry/Cancel prompt after a rejected verdict.
    async fn prompt_retry(&self, reply: &str) -> Result<(), AppError>;

    /// Disables the buttons on the most recent prompt so a stale press
    /// cannot fire into a later stage.
    async fn retire_prompt(&self) -> Result<(), AppError>;

    /// Deletes the underlying channel.
    async fn close_ticket(&self) -> Result<(), AppError>;
}

#[derive(Clone, Copy)]
enum PromptKind {
    Confirm,
    Retry,
}

fn prompt_buttons(kind: PromptKind, disabled: bool) -> CreateActionRow {
    let buttons = match kind {
        PromptKind::Confirm => vec![
            CreateButton::new(BUTTON_CONFIRM)
                .label("Confirm")
                .style(ButtonStyle::Success)
                .disabled(disabled),
            CreateButton::new(BUTTON_CORRECT)
                .label("Correct it")
                .style(ButtonStyle::Secondary)
                .disabled(disabled),
        ],
        PromptKind::Retry => vec![
            CreateButton::new(BUTTON_RETRY)
                .label("Try another email")
                .style(ButtonStyle::Primary)
                .disabled(disabled),
            CreateButton::new(BUTTON_CANCEL)
                .label("Cancel")
                .style(ButtonStyle::Danger)
                .disabled(disabled),
        ],
    };

    CreateActionRow::Buttons(buttons)
}

/// Ticket IO backed by a Discord channel.
pub struct DiscordTicketIo {
    http: Arc<Http>,
    channel_id: ChannelId,
    active_prompt: Mutex<Option<(MessageId, PromptKind)>>,
}

impl DiscordTicketIo {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self {
            http,
            channel_id,
            active_prompt: Mutex::new(None),
        }
    }

    async fn send_prompt(&self, content: String, kind: PromptKind) -> Result<(), AppError> {
        let message = self
            .channel_id
            .send_message(
                &self.http,
                CreateMessage::new()
                    .content(content)
                    .components(vec![prompt_buttons(kind, false)]),
            )
            .await?;

        let mut active = self
            .active_prompt
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *active = Some((message.id, kind));

        Ok(())
    }
}

#[async_trait]
impl TicketIo for DiscordTicketIo {
    async fn send_notice(&self, text: &str) -> Result<(), AppError> {
        self.channel_id
            .send_message(&self.http, CreateMessage::new().content(text))
            .await?;

        Ok(())
    }

    async fn prompt_confirmation(&self, email: &str) -> Result<(), AppError> {
        let content = format!("Is **{email}** the email you used for the purchase?");
        self.send_prompt(content, PromptKind::Confirm).await
    }

    async fn prompt_retry(&self, reply: &str) -> Result<(), AppError> {
        let content = format!("{reply}\nWould you like to try another email?");
        self.send_prompt(content, PromptKind::Retry).await
    }

    async fn retire_prompt(&self) -> Result<(), AppError> {
        let taken = self
            .active_prompt
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();

        let Some((message_id, kind)) = taken else {
            return Ok(());
        };

        self.channel_id
            .edit_message(
                &self.http,
                message_id,
                EditMessage::new().components(vec![prompt_buttons(kind, true)]),
            )
            .await?;

        Ok(())
    }

    async fn close_ticket(&self) -> Result<(), AppError> {
        self.http
            .delete_channel(self.channel_id, Some("ticket closed"))
            .await?;

        Ok(())
    }
}
