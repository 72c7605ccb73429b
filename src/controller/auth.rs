use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::{
    error::AppError,
    model::event::SinkEvent,
    service::oauth::DiscordAuthService,
    state::AppState,
};

/// Query parameters for the login endpoint.
#[derive(Deserialize)]
pub struct LoginParams {
    /// Purchase email forwarded by the storefront's post-checkout link.
    pub email: Option<String>,
}

/// Query parameters for the OAuth callback endpoint.
///
/// # Fields
/// - `code` - Authorization code used to exchange for access tokens
/// - `state` - The purchase email passed through the authorize redirect
#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    params: Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = DiscordAuthService::new(state.http_client, state.oauth_client);

    let url = auth_service.login_url(params.0.email.as_deref());

    Ok(Redirect::temporary(url.as_ref()))
}

/// Completes the login: exchanges the code, joins the user to the guild,
/// grants the base role, and reports the login to the Notification Sink.
///
/// Everything after the token exchange is best-effort. The user already
/// authenticated, so a failed guild join or role grant is logged and the
/// success page is shown anyway; staff can finish the onboarding by hand.
pub async fn callback(
    State(state): State<AppState>,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let Some(code) = params.0.code else {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html("<h1>Login failed</h1><p>Discord did not return an authorization code. Please try again.</p>".to_string()),
        ));
    };
    let purchase_email = params
        .0
        .state
        .as_deref()
        .filter(|email| !email.is_empty());

    let auth_service = DiscordAuthService::new(state.http_client, state.oauth_client);
    let login = auth_service.exchange(code).await?;
    let identity = &login.identity;

    match identity.parsed_id() {
        Some(user_id) => {
            if let Err(e) = state.directory.join_guild(user_id, &login.access_token).await {
                tracing::warn!("guild join failed for user {}: {}", user_id, e);
            }
            if let Some(base_role_id) = state.config.base_role_id {
                if let Err(e) = state.directory.grant_role(user_id, base_role_id).await {
                    tracing::warn!("base role grant failed for user {}: {}", user_id, e);
                }
            }
        }
        None => tracing::warn!("unparsable discord id in identity: {}", identity.id),
    }

    let event = SinkEvent::login(purchase_email, identity);
    if let Err(e) = state.sink.send(&event).await {
        tracing::warn!("login event not delivered for user {}: {}", identity.id, e);
    }

    tracing::info!(
        "login completed for {} ({})",
        identity.username,
        identity.id
    );

    Ok((StatusCode::OK, Html(success_page(purchase_email))))
}

fn success_page(purchase_email: Option<&str>) -> String {
    // The email comes straight from the query string, so escape it.
    let email_line = match purchase_email {
        Some(email) => format!(
            "<p>Purchase email received: <strong>{}</strong></p>",
            escape_html(email)
        ),
        None => String::new(),
    };

    format!(
        "<html><body style=\"font-family: sans-serif; text-align: center; margin-top: 4em\">\
         <h1>Welcome aboard!</h1>\
         <p>You have been added to the server. You can close this tab and head back to Discord.</p>\
         {}\
         </body></html>",
        email_line
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
