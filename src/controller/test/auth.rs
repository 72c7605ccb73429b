use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

use super::test_router;
use crate::{config::RevokePolicy, service::mock::MockDirectory};

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Tests the liveness endpoint.
///
/// Expected: plain 200
#[tokio::test]
async fn health_endpoint_responds() {
    let app = test_router(Arc::new(MockDirectory::default()), RevokePolicy::StripRoles);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Tests the login redirect.
///
/// Expected: temporary redirect to the Discord authorize URL with the
/// purchase email riding in the state parameter
#[tokio::test]
async fn login_redirects_to_discord_with_email_state() {
    let app = test_router(Arc::new(MockDirectory::default()), RevokePolicy::StripRoles);

    let response = app
        .oneshot(get("/login?email=buyer%40example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    let url = Url::parse(location).unwrap();
    assert_eq!(url.host_str(), Some("discord.com"));

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    assert_eq!(params["state"], "buyer@example.com");
    assert_eq!(params["client_id"], "client-id");
}

/// Tests a login without a purchase email.
///
/// Expected: redirect still issued, empty state
#[tokio::test]
async fn login_without_email_still_redirects() {
    let app = test_router(Arc::new(MockDirectory::default()), RevokePolicy::StripRoles);

    let response = app.oneshot(get("/login")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    let url = Url::parse(location).unwrap();
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    assert_eq!(params["state"], "");
}

/// Tests the callback when Discord returns no authorization code, which
/// happens when the user denies the consent screen.
///
/// Expected: 400 with a human-readable page, no directory calls
#[tokio::test]
async fn callback_without_code_is_bad_request() {
    let directory = Arc::new(MockDirectory::default());
    let app = test_router(directory.clone(), RevokePolicy::StripRoles);

    let response = app
        .oneshot(get("/callback?state=buyer%40example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(directory.mutation_count(), 0);
}
