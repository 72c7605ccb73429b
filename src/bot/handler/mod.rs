mod interaction;
mod message;
mod ready;

use serenity::all::{Context, EventHandler, Interaction, Message, Ready};
use serenity::async_trait;
use std::sync::Arc;

use crate::{
    config::Config,
    service::{
        directory::MembershipDirectory, notify::NotificationSink, ticket::SessionRegistry,
        validation::ValidationAuthority,
    },
};

/// Discord bot event handler.
///
/// Owns the session registry; every gateway event that belongs to a ticket
/// channel is routed through it to the channel's dialogue session.
pub struct Handler {
    config: Arc<Config>,
    directory: Arc<dyn MembershipDirectory>,
    validator: Arc<dyn ValidationAuthority>,
    sink: Arc<NotificationSink>,
    sessions: SessionRegistry,
}

impl Handler {
    pub fn new(
        config: Arc<Config>,
        directory: Arc<dyn MembershipDirectory>,
        validator: Arc<dyn ValidationAuthority>,
        sink: Arc<NotificationSink>,
    ) -> Self {
        Self {
            config,
            directory,
            validator,
            sink,
            sessions: SessionRegistry::default(),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        self.on_ready(ctx, ready).await;
    }

    async fn message(&self, ctx: Context, message: Message) {
        self.on_message(ctx, message).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        self.on_interaction(ctx, interaction).await;
    }
}
