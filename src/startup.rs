use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::{config::Config, error::AppError, state::OAuth2Client};

/// Builds the shared reqwest client.
///
/// Redirects are disabled so a compromised upstream cannot bounce our
/// credentialed requests somewhere else.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client for the Discord authentication flow.
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(AuthUrl::new(config.discord_auth_url.clone())?)
        .set_token_uri(TokenUrl::new(config.discord_token_url.clone())?)
        .set_redirect_uri(RedirectUrl::new(config.discord_redirect_url.clone())?);

    Ok(client)
}
