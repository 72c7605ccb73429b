use std::collections::HashMap;

use crate::{
    config::RevokePolicy, service::mock::test_config, service::oauth::DiscordAuthService, startup,
};

fn service() -> DiscordAuthService {
    let config = test_config(RevokePolicy::StripRoles);
    let http_client = startup::setup_reqwest_client().unwrap();
    let oauth_client = startup::setup_oauth_client(&config).unwrap();
    DiscordAuthService::new(http_client, oauth_client)
}

/// Tests the login URL carries the purchase email in the state parameter.
///
/// The email must round-trip verbatim through Discord, special characters
/// included, so it is compared after query decoding.
///
/// Expected: state equals the email, all three scopes requested
#[test]
fn login_url_carries_purchase_email_in_state() {
    let url = service().login_url(Some("buyer+vip@example.com"));

    let params: HashMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    assert_eq!(url.host_str(), Some("discord.com"));
    assert_eq!(params["state"], "buyer+vip@example.com");
    assert_eq!(params["client_id"], "client-id");
    assert_eq!(params["response_type"], "code");
    assert_eq!(params["redirect_uri"], "https://gate.example.com/callback");

    let scope = &params["scope"];
    assert!(scope.contains("identify"));
    assert!(scope.contains("guilds.join"));
    assert!(scope.contains("email"));
}

/// Tests the login URL when no purchase email was supplied.
///
/// Expected: empty state parameter
#[test]
fn login_url_without_email_has_empty_state() {
    let url = service().login_url(None);

    let state = url
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned());

    assert_eq!(state.as_deref(), Some(""));
}
