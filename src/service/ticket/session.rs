//! The ticket dialogue state machine.
//!
//! One session runs per ticket, consuming the channel's events from a single
//! mpsc receiver: collect an email, confirm it, submit it to the Validation
//! Authority, and grant the entitlement roles on approval. The explicit loop
//! replaces the re-armed one-shot collectors of earlier incarnations, so a
//! correction round cannot leak a listener and the channel is deleted from
//! exactly one place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};

use crate::{
    model::{event::SinkEvent, validation::ValidationRequest},
    service::{
        directory::MembershipDirectory, notify::NotificationSink, ticket::io::TicketIo,
        validation::ValidationAuthority,
    },
};

use super::{BUTTON_CANCEL, BUTTON_CONFIRM, BUTTON_CORRECT, BUTTON_RETRY};

/// Uniform deadline for every stage that awaits user input.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(120);

const WELCOME: &str =
    "Welcome! Please send the email address you used for your purchase in this channel.";
const ASK_AGAIN: &str = "No problem, send the correct email address.";
const INACTIVITY: &str = "Closing this ticket due to inactivity.";
const CLOSING: &str = "Understood, closing this ticket.";
const CONNECTIVITY_FAILURE: &str =
    "We could not reach the validation service. A member of the team will take over this ticket.";
const SUCCESS: &str = "Purchase confirmed! Your VIP access has been granted. This channel will now close.";
const DEFAULT_REJECTION: &str = "We could not find a purchase for that email.";
const BASE_ROLE_WARNING: &str =
    "Note: your old member role could not be removed automatically, but your VIP access is active.";
const VIP_ROLE_WARNING: &str =
    "Your purchase was approved, but granting the VIP role failed. A member of the team will fix this.";

/// Raw channel input routed to a session by the gateway handler.
#[derive(Debug)]
pub enum SessionEvent {
    Message { user_id: u64, content: String },
    Button { user_id: u64, custom_id: String },
}

impl SessionEvent {
    fn user_id(&self) -> u64 {
        match self {
            Self::Message { user_id, .. } | Self::Button { user_id, .. } => *user_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    AwaitingEmail,
    AwaitingConfirmation,
    Validating,
    AwaitingRetryDecision,
}

/// How a session ended.
///
/// `Faulted` is the one terminal state that leaves the channel in place: the
/// Validation Authority could not be reached and an operator is expected to
/// pick the ticket up manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Success,
    Cancelled,
    TimedOut,
    Faulted,
}

/// Identity and role configuration for one session.
pub struct SessionContext {
    pub owner_id: u64,
    pub owner_name: String,
    pub vip_role_id: u64,
    pub base_role_id: Option<u64>,
}

pub struct DialogueSession {
    ctx: SessionContext,
    directory: Arc<dyn MembershipDirectory>,
    validator: Arc<dyn ValidationAuthority>,
    sink: Arc<NotificationSink>,
    io: Arc<dyn TicketIo>,
    timeout: Duration,
}

impl DialogueSession {
    pub fn new(
        ctx: SessionContext,
        directory: Arc<dyn MembershipDirectory>,
        validator: Arc<dyn ValidationAuthority>,
        sink: Arc<NotificationSink>,
        io: Arc<dyn TicketIo>,
    ) -> Self {
        Self {
            ctx,
            directory,
            validator,
            sink,
            io,
            timeout: SESSION_TIMEOUT,
        }
    }

    /// Runs the dialogue to completion.
    ///
    /// Input from anyone but the owner is ignored without resetting the
    /// deadline. A closed event stream means the ticket infrastructure went
    /// away; the session ends quietly without touching the channel.
    pub async fn run(self, mut events: mpsc::Receiver<SessionEvent>) -> SessionOutcome {
        self.notify(WELCOME).await;

        let mut stage = Stage::AwaitingEmail;
        let mut candidate: Option<String> = None;
        let mut deadline = Instant::now() + self.timeout;

        loop {
            if stage == Stage::Validating {
                match self.validate_candidate(candidate.as_deref().unwrap_or_default()).await {
                    VerdictStep::Approved => return self.approve().await,
                    VerdictStep::Rejected => {
                        stage = Stage::AwaitingRetryDecision;
                        deadline = Instant::now() + self.timeout;
                    }
                    VerdictStep::Unreachable => {
                        self.notify(CONNECTIVITY_FAILURE).await;
                        return SessionOutcome::Faulted;
                    }
                }
                continue;
            }

            let event = match timeout_at(deadline, events.recv()).await {
                Err(_) => return self.expire().await,
                Ok(None) => return SessionOutcome::Cancelled,
                Ok(Some(event)) => event,
            };

            if event.user_id() != self.ctx.owner_id {
                continue;
            }

            match (stage, event) {
                (Stage::AwaitingEmail, SessionEvent::Message { content, .. }) => {
                    let email = content.trim().to_string();
                    if email.is_empty() {
                        continue;
                    }
                    if self.io.prompt_confirmation(&email).await.is_err() {
                        tracing::warn!("confirmation prompt not delivered");
                    }
                    candidate = Some(email);
                    stage = Stage::AwaitingConfirmation;
                    deadline = Instant::now() + self.timeout;
                }
                (Stage::AwaitingConfirmation, SessionEvent::Button { custom_id, .. }) => {
                    match custom_id.as_str() {
                        BUTTON_CONFIRM => {
                            self.retire_prompt().await;
                            stage = Stage::Validating;
                        }
                        BUTTON_CORRECT => {
                            self.retire_prompt().await;
                            candidate = None;
                            self.notify(ASK_AGAIN).await;
                            stage = Stage::AwaitingEmail;
                            deadline = Instant::now() + self.timeout;
                        }
                        _ => {}
                    }
                }
                (Stage::AwaitingRetryDecision, SessionEvent::Button { custom_id, .. }) => {
                    match custom_id.as_str() {
                        BUTTON_RETRY => {
                            self.retire_prompt().await;
                            candidate = None;
                            self.notify(ASK_AGAIN).await;
                            stage = Stage::AwaitingEmail;
                            deadline = Instant::now() + self.timeout;
                        }
                        BUTTON_CANCEL => {
                            self.retire_prompt().await;
                            self.notify(CLOSING).await;
                            self.close().await;
                            return SessionOutcome::Cancelled;
                        }
                        _ => {}
                    }
                }
                // Text during a button stage, or a stray button during email
                // collection, changes nothing.
                _ => {}
            }
        }
    }

    async fn validate_candidate(&self, email: &str) -> VerdictStep {
        let request = ValidationRequest::new(email, self.ctx.owner_id, &self.ctx.owner_name);

        match self.validator.validate(&request).await {
            Ok(verdict) => {
                let event = SinkEvent::ticket_outcome(
                    self.ctx.owner_id,
                    &self.ctx.owner_name,
                    email,
                    verdict.approved,
                );
                if let Err(e) = self.sink.send(&event).await {
                    tracing::warn!("ticket outcome event not delivered: {}", e);
                }

                if verdict.approved {
                    VerdictStep::Approved
                } else {
                    let reply = verdict.reply.as_deref().unwrap_or(DEFAULT_REJECTION);
                    if self.io.prompt_retry(reply).await.is_err() {
                        tracing::warn!("retry prompt not delivered");
                    }
                    VerdictStep::Rejected
                }
            }
            Err(e) => {
                tracing::error!(
                    "validation authority call failed for user {}: {}",
                    self.ctx.owner_id,
                    e
                );
                VerdictStep::Unreachable
            }
        }
    }

    /// Grants the VIP role and best-effort revokes the base role.
    ///
    /// Role mutation failures are logged and surfaced as warnings but never
    /// roll anything back: the verdict was approved, so the session still
    /// closes as a success.
    async fn approve(&self) -> SessionOutcome {
        if let Err(e) = self
            .directory
            .grant_role(self.ctx.owner_id, self.ctx.vip_role_id)
            .await
        {
            tracing::error!("VIP grant failed for user {}: {}", self.ctx.owner_id, e);
            self.notify(VIP_ROLE_WARNING).await;
        }

        if let Some(base_role_id) = self.ctx.base_role_id {
            if let Err(e) = self.directory.revoke_role(self.ctx.owner_id, base_role_id).await {
                tracing::warn!(
                    "base role removal failed for user {}: {}",
                    self.ctx.owner_id,
                    e
                );
                self.notify(BASE_ROLE_WARNING).await;
            }
        }

        self.notify(SUCCESS).await;
        self.close().await;

        SessionOutcome::Success
    }

    async fn expire(&self) -> SessionOutcome {
        self.notify(INACTIVITY).await;
        self.close().await;

        SessionOutcome::TimedOut
    }

    async fn notify(&self, text: &str) {
        // A notice failing to send usually means the channel is already gone.
        if let Err(e) = self.io.send_notice(text).await {
            tracing::debug!("ticket notice not delivered: {}", e);
        }
    }

    async fn retire_prompt(&self) {
        if let Err(e) = self.io.retire_prompt().await {
            tracing::debug!("prompt not retired: {}", e);
        }
    }

    async fn close(&self) {
        if let Err(e) = self.io.close_ticket().await {
            tracing::warn!("ticket channel not deleted: {}", e);
        }
    }
}

enum VerdictStep {
    Approved,
    Rejected,
    Unreachable,
}
