use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Request body accepted by the revocation endpoint.
///
/// All fields are optional at the serde level so that authorization and
/// validation failures can be reported separately: a missing secret is a
/// 403, a missing target identity is a 400.
#[derive(Debug, Deserialize)]
pub struct BanRequest {
    pub secret: Option<String>,
    pub discord_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Success body returned by the revocation endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
}
