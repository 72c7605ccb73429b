use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::{
    bot::handler::Handler,
    config::Config,
    error::AppError,
    service::{
        directory::MembershipDirectory, notify::NotificationSink, validation::ValidationAuthority,
    },
};

/// Builds the Discord client with the gatekeeper event handler attached.
///
/// MESSAGE_CONTENT is a privileged intent and must be enabled in the Discord
/// Developer Portal for the bot application.
pub async fn init_bot(
    config: Arc<Config>,
    directory: Arc<dyn MembershipDirectory>,
    validator: Arc<dyn ValidationAuthority>,
    sink: Arc<NotificationSink>,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler::new(config.clone(), directory, validator, sink);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Runs the bot until shutdown. Call from a dedicated tokio task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
