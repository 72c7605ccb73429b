use serde::{Deserialize, Serialize};

/// Event-kind discriminator the Validation Authority matches on.
///
/// Pinned by the external automation platform's contract; do not rename.
pub const VALIDATION_EVENT_KIND: &str = "VALIDACAO_TICKET";

/// Payload submitted to the Validation Authority for one (email, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRequest {
    pub tipo: &'static str,
    pub email: String,
    pub discord_id: String,
    pub username: String,
}

impl ValidationRequest {
    pub fn new(email: &str, discord_id: u64, username: &str) -> Self {
        Self {
            tipo: VALIDATION_EVENT_KIND,
            email: email.to_string(),
            discord_id: discord_id.to_string(),
            username: username.to_string(),
        }
    }
}

/// Approval verdict returned by the Validation Authority.
///
/// Consumed immediately to decide role mutation and to render the outcome
/// message; never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    pub approved: bool,
    #[serde(default)]
    pub reply: Option<String>,
}
