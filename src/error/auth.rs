use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The revocation endpoint was called without the shared secret or with a
    /// value that does not match the configured one.
    ///
    /// Rejected before any directory mutation happens. Results in a
    /// 403 Forbidden response.
    #[error("invalid or missing webhook secret")]
    InvalidWebhookSecret,
}

/// Converts authentication errors into HTTP responses.
///
/// The rejection is logged as a security event server-side; the client only
/// sees a generic message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidWebhookSecret => {
                tracing::warn!("revocation request rejected: invalid shared secret");
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "Invalid secret.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
