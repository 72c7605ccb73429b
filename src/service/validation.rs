//! Validation Authority client.
//!
//! The authority is a black box on the other side of a webhook: it receives
//! an (email, user) pair and answers with an approval verdict and an
//! optional human-readable message.

use serenity::async_trait;

use crate::{
    error::AppError,
    model::validation::{ValidationRequest, Verdict},
};

#[async_trait]
pub trait ValidationAuthority: Send + Sync {
    async fn validate(&self, request: &ValidationRequest) -> Result<Verdict, AppError>;
}

/// Validation Authority reached over an outbound webhook.
pub struct WebhookValidator {
    client: reqwest::Client,
    url: String,
}

impl WebhookValidator {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl ValidationAuthority for WebhookValidator {
    /// Submits the request and parses the verdict.
    ///
    /// A non-2xx status or a malformed body is an error; the caller surfaces
    /// it to the user as a generic connectivity failure and leaves the ticket
    /// open for manual intervention.
    async fn validate(&self, request: &ValidationRequest) -> Result<Verdict, AppError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "validation authority returned {}",
                response.status()
            )));
        }

        let verdict = response.json::<Verdict>().await?;

        Ok(verdict)
    }
}
