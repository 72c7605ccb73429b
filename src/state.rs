//! Application state shared across all request handlers.
//!
//! Initialized once during startup and cloned for each request handler
//! through Axum's state extraction. Every field is cheap to clone:
//! `reqwest::Client` and the trait objects are reference-counted, and the
//! OAuth2 client is designed to be cloned.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use std::sync::Arc;

use crate::{
    config::Config,
    service::{directory::MembershipDirectory, notify::NotificationSink},
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for external API requests.
    ///
    /// Configured with redirects disabled to prevent SSRF vulnerabilities.
    /// Used for the OAuth token exchange and identity fetch.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord authentication flow.
    pub oauth_client: OAuth2Client,

    /// Membership Directory seam for guild join, role, and ban mutations.
    pub directory: Arc<dyn MembershipDirectory>,

    /// Notification Sink for outbound automation events.
    pub sink: Arc<NotificationSink>,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        directory: Arc<dyn MembershipDirectory>,
        sink: Arc<NotificationSink>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            directory,
            sink,
            config,
        }
    }
}
