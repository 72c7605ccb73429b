use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    error::{auth::AuthError, AppError},
    model::{api::BanRequest, api::WebhookResponse, event::SinkEvent},
    service::revoke::RevocationService,
    state::AppState,
};

/// Revokes a member's access on behalf of the automation platform.
///
/// The shared secret is checked before anything else; a bad or missing
/// secret never reaches the directory. The target id arrives as a string
/// snowflake and must parse to a u64.
pub async fn ban(
    State(state): State<AppState>,
    Json(request): Json<BanRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.secret.as_deref() != Some(state.config.webhook_secret.as_str()) {
        return Err(AuthError::InvalidWebhookSecret.into());
    }

    let user_id = request
        .discord_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing discord_id.".to_string()))?
        .parse::<u64>()
        .map_err(|_| AppError::BadRequest("Invalid discord_id.".to_string()))?;

    let reason = request.reason.as_deref().unwrap_or("Access revoked");

    let revocation = RevocationService::new(state.directory.clone(), state.config.clone());
    let message = revocation.revoke(user_id, reason).await?;

    let event = SinkEvent::revocation(user_id, reason);
    if let Err(e) = state.sink.send(&event).await {
        tracing::warn!("revocation event not delivered for user {}: {}", user_id, e);
    }

    Ok(Json(WebhookResponse {
        success: true,
        message,
    }))
}
