use oauth2::{AuthorizationCode, TokenResponse};

use crate::{
    error::AppError,
    model::discord::DiscordIdentity,
    service::oauth::DiscordAuthService,
};

/// The authenticated identity plus the access token needed for the
/// guild-join step.
pub struct LoginIdentity {
    pub identity: DiscordIdentity,
    pub access_token: String,
}

impl DiscordAuthService {
    /// Exchanges the authorization code for an access token and fetches the
    /// authenticated user's identity.
    pub async fn exchange(&self, authorization_code: String) -> Result<LoginIdentity, AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(&self.http_client)
            .await
            .map_err(|e| AppError::InternalError(format!("token exchange failed: {e}")))?;

        let access_token = token.access_token().secret().clone();
        let identity = self.fetch_discord_user(&access_token).await?;

        Ok(LoginIdentity {
            identity,
            access_token,
        })
    }

    /// Retrieves a Discord user's information using the provided access token
    async fn fetch_discord_user(&self, access_token: &str) -> Result<DiscordIdentity, AppError> {
        let user_info = self
            .http_client
            .get("https://discord.com/api/users/@me")
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?
            .json::<DiscordIdentity>()
            .await?;

        Ok(user_info)
    }
}
