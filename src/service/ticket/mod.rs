//! Ticket lifecycle: private channel creation, session registry, and the
//! purchase validation dialogue.

pub mod io;
pub mod session;

#[cfg(test)]
mod test;

use serenity::all::{
    ChannelId, ChannelType, CreateChannel, GuildId, PermissionOverwrite, PermissionOverwriteType,
    Permissions, RoleId, UserId,
};
use serenity::http::Http;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

use crate::{
    config::Config,
    error::AppError,
    service::{
        directory::MembershipDirectory,
        notify::{AuditLog, NotificationSink},
        ticket::{
            io::DiscordTicketIo,
            session::{DialogueSession, SessionContext, SessionEvent},
        },
        validation::ValidationAuthority,
    },
};

pub const BUTTON_OPEN: &str = "ticket_open";
pub const BUTTON_CONFIRM: &str = "ticket_confirm";
pub const BUTTON_CORRECT: &str = "ticket_correct";
pub const BUTTON_RETRY: &str = "ticket_retry";
pub const BUTTON_CANCEL: &str = "ticket_cancel";

/// Events a session's mpsc channel can buffer before input is dropped.
const SESSION_EVENT_BUFFER: usize = 16;

/// Normalizes a display name into a ticket channel name.
///
/// Lowercased, with runs of anything outside ASCII alphanumerics collapsed
/// into single dashes. Uniqueness of open tickets is checked against this
/// name, not the user id, so two users whose names normalize identically
/// block each other's tickets. Known quirk, kept deliberately.
pub fn ticket_channel_name(username: &str) -> String {
    let mut name = String::from("ticket-");
    let mut previous_dash = true;

    for c in username.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c);
            previous_dash = false;
        } else if !previous_dash {
            name.push('-');
            previous_dash = true;
        }
    }

    name.trim_end_matches('-').to_string()
}

/// Live sessions keyed by channel id.
///
/// The gateway handler dispatches messages and button presses here; each
/// session owns the receiving end and unregisters itself when it ends.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<u64, mpsc::Sender<SessionEvent>>>>,
}

impl SessionRegistry {
    pub fn register(&self, channel_id: u64) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel(SESSION_EVENT_BUFFER);
        self.lock().insert(channel_id, tx);
        rx
    }

    pub fn remove(&self, channel_id: u64) {
        self.lock().remove(&channel_id);
    }

    /// Routes an event to the session bound to a channel.
    ///
    /// Returns false when the channel has no session. A full buffer drops
    /// the event; the dialogue only ever needs the next matching input.
    pub fn dispatch(&self, channel_id: u64, event: SessionEvent) -> bool {
        let Some(tx) = self.lock().get(&channel_id).cloned() else {
            return false;
        };

        if let Err(e) = tx.try_send(event) {
            tracing::warn!("session event for channel {} dropped: {}", channel_id, e);
        }

        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, mpsc::Sender<SessionEvent>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// What happened to an open-ticket request.
pub enum OpenTicketOutcome {
    Opened(u64),
    AlreadyOpen,
}

pub struct TicketService {
    config: Arc<Config>,
    directory: Arc<dyn MembershipDirectory>,
    validator: Arc<dyn ValidationAuthority>,
    sink: Arc<NotificationSink>,
    sessions: SessionRegistry,
}

impl TicketService {
    pub fn new(
        config: Arc<Config>,
        directory: Arc<dyn MembershipDirectory>,
        validator: Arc<dyn ValidationAuthority>,
        sink: Arc<NotificationSink>,
        sessions: SessionRegistry,
    ) -> Self {
        Self {
            config,
            directory,
            validator,
            sink,
            sessions,
        }
    }

    /// Opens a ticket channel for a user and spawns its dialogue session.
    ///
    /// The channel is private: hidden from @everyone, visible to the owner
    /// and the optional support role, parented to the optional category.
    ///
    /// # Returns
    /// - `Ok(Opened)` - Channel created, session running
    /// - `Ok(AlreadyOpen)` - A channel with the user's normalized ticket name exists
    /// - `Err(AppError)` - Discord channel listing or creation failed
    pub async fn open(
        &self,
        http: Arc<Http>,
        user_id: u64,
        username: &str,
    ) -> Result<OpenTicketOutcome, AppError> {
        let guild_id = GuildId::new(self.config.guild_id);
        let name = ticket_channel_name(username);

        let channels = guild_id.channels(&http).await?;
        if channels.values().any(|channel| channel.name == name) {
            return Ok(OpenTicketOutcome::AlreadyOpen);
        }

        let channel_access =
            Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::READ_MESSAGE_HISTORY;

        let mut overwrites = vec![
            // The @everyone role shares the guild's id.
            PermissionOverwrite {
                allow: Permissions::empty(),
                deny: Permissions::VIEW_CHANNEL,
                kind: PermissionOverwriteType::Role(RoleId::new(self.config.guild_id)),
            },
            PermissionOverwrite {
                allow: channel_access,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(UserId::new(user_id)),
            },
        ];
        if let Some(support_role_id) = self.config.support_role_id {
            overwrites.push(PermissionOverwrite {
                allow: channel_access,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(RoleId::new(support_role_id)),
            });
        }

        let mut builder = CreateChannel::new(name.as_str())
            .kind(ChannelType::Text)
            .permissions(overwrites);
        if let Some(category_id) = self.config.ticket_category_id {
            builder = builder.category(ChannelId::new(category_id));
        }

        let channel = guild_id.create_channel(&http, builder).await?;
        let channel_key = channel.id.get();

        tracing::info!(
            "opened ticket channel {} for user {} ({})",
            channel_key,
            username,
            user_id
        );

        let events = self.sessions.register(channel_key);
        let session = DialogueSession::new(
            SessionContext {
                owner_id: user_id,
                owner_name: username.to_string(),
                vip_role_id: self.config.vip_role_id,
                base_role_id: self.config.base_role_id,
            },
            self.directory.clone(),
            self.validator.clone(),
            self.sink.clone(),
            Arc::new(DiscordTicketIo::new(http.clone(), channel.id)),
        );

        let sessions = self.sessions.clone();
        let audit = AuditLog::new(http, self.config.audit_channel_id);
        let owner_name = username.to_string();
        tokio::spawn(async move {
            let outcome = session.run(events).await;
            sessions.remove(channel_key);

            tracing::info!("ticket session for {} ended: {:?}", owner_name, outcome);
            if let Err(e) = audit
                .post(&format!("Ticket for {} ended: {:?}", owner_name, outcome))
                .await
            {
                tracing::debug!("audit message not delivered: {}", e);
            }
        });

        Ok(OpenTicketOutcome::Opened(channel_key))
    }
}
