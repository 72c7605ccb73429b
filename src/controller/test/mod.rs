use axum::body::{to_bytes, Body};
use axum::http::Response;
use axum::Router;
use std::sync::Arc;

use crate::{
    config::RevokePolicy,
    router::router,
    service::mock::{test_config, MockDirectory},
    service::notify::NotificationSink,
    startup::setup_oauth_client,
    state::AppState,
};

mod auth;

/// Builds the full router around a mock directory, a sink without a URL,
/// and the fixed test configuration.
fn test_router(directory: Arc<MockDirectory>, revoke_policy: RevokePolicy) -> Router {
    let config = Arc::new(test_config(revoke_policy));
    let http_client = reqwest::Client::new();
    let oauth_client = setup_oauth_client(&config).unwrap();
    let sink = Arc::new(NotificationSink::new(http_client.clone(), None));

    router().with_state(AppState::new(
        http_client,
        oauth_client,
        directory,
        sink,
        config,
    ))
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
