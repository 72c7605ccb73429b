mod bot;
mod config;
mod controller;
mod error;
mod model;
mod router;
mod service;
mod startup;
mod state;

use std::sync::Arc;

use serenity::http::Http;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::AppError,
    service::{
        directory::DiscordDirectory, notify::NotificationSink, validation::WebhookValidator,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    if tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {
        eprintln!("tracing subscriber already initialized");
    }

    let config = Arc::new(Config::from_env()?);

    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let discord_http = Arc::new(Http::new(&config.discord_bot_token));

    let directory = Arc::new(DiscordDirectory::new(
        discord_http.clone(),
        http_client.clone(),
        config.guild_id,
        config.discord_bot_token.clone(),
    ));
    let validator = Arc::new(WebhookValidator::new(
        http_client.clone(),
        config.validation_webhook_url.clone(),
    ));
    let sink = Arc::new(NotificationSink::new(
        http_client.clone(),
        config.sink_webhook_url.clone(),
    ));

    tracing::info!("Starting server");

    let bot_client = bot::start::init_bot(
        config.clone(),
        directory.clone(),
        validator.clone(),
        sink.clone(),
    )
    .await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let app = router::router().with_state(AppState::new(
        http_client,
        oauth_client,
        directory,
        sink,
        config.clone(),
    ));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(|e| AppError::InternalError(format!("could not bind port {}: {e}", config.port)))?;

    tracing::info!("Listening on port {}", config.port);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalError(format!("server error: {e}")))?;

    Ok(())
}
