use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::service::oauth::DiscordAuthService;

impl DiscordAuthService {
    /// Builds the Discord authorize URL for the login redirect.
    ///
    /// The purchase email rides in the standard `state` parameter as an
    /// opaque passthrough value and comes back verbatim on the callback; an
    /// absent email becomes an empty state. The `guilds.join` scope is what
    /// later lets the bot add the user to the managed guild.
    pub fn login_url(&self, purchase_email: Option<&str>) -> Url {
        let state = purchase_email.unwrap_or_default().to_string();

        let (authorize_url, _state) = self
            .oauth_client
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("guilds.join".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .url();

        authorize_url
    }
}
