use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    controller::{
        auth::{callback, login},
        health::health,
        webhook::ban,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/webhook/ban", post(ban))
}
