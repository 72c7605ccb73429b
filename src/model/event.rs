use chrono::Utc;
use serde::Serialize;

use crate::model::discord::DiscordIdentity;

/// Events posted to the Notification Sink.
///
/// Fire-and-forget from the caller's point of view, but sending returns an
/// explicit result so failures are logged rather than silently swallowed.
/// The `tipo` tag and the login field names are part of the automation
/// platform's contract.
#[derive(Debug, Serialize)]
#[serde(tag = "tipo")]
pub enum SinkEvent {
    #[serde(rename = "LOGIN")]
    Login {
        email_compra: String,
        discord_id: String,
        username: String,
        email_discord: Option<String>,
        avatar: Option<String>,
        data: String,
    },
    #[serde(rename = "RESULTADO_TICKET")]
    TicketOutcome {
        discord_id: String,
        username: String,
        email: String,
        approved: bool,
        data: String,
    },
    #[serde(rename = "REVOGACAO")]
    Revocation {
        discord_id: String,
        reason: String,
        data: String,
    },
}

impl SinkEvent {
    /// Login event carrying the purchase email recovered from the OAuth state
    /// parameter alongside the authenticated Discord identity.
    pub fn login(purchase_email: Option<&str>, identity: &DiscordIdentity) -> Self {
        Self::Login {
            email_compra: purchase_email.unwrap_or("").to_string(),
            discord_id: identity.id.clone(),
            username: identity.username.clone(),
            email_discord: identity.email.clone(),
            avatar: identity.avatar.clone(),
            data: Utc::now().to_rfc3339(),
        }
    }

    pub fn ticket_outcome(discord_id: u64, username: &str, email: &str, approved: bool) -> Self {
        Self::TicketOutcome {
            discord_id: discord_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            approved,
            data: Utc::now().to_rfc3339(),
        }
    }

    pub fn revocation(discord_id: u64, reason: &str) -> Self {
        Self::Revocation {
            discord_id: discord_id.to_string(),
            reason: reason.to_string(),
            data: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Tests the login event wire shape.
    ///
    /// The automation platform cross-references the purchase email against
    /// the Discord identity, so both must survive serialization unchanged.
    ///
    /// Expected: LOGIN tipo tag with purchase and account emails
    #[test]
    fn serializes_login_event() {
        let identity = DiscordIdentity {
            id: "42".to_string(),
            username: "buyer".to_string(),
            email: Some("account@example.com".to_string()),
            avatar: None,
        };
        let event = SinkEvent::login(Some("buyer@example.com"), &identity);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["tipo"], "LOGIN");
        assert_eq!(value["email_compra"], "buyer@example.com");
        assert_eq!(value["discord_id"], "42");
        assert_eq!(value["email_discord"], "account@example.com");
        assert!(value["data"].is_string());
    }

    /// Tests that an absent purchase email serializes as an empty string
    /// rather than null, matching what the sink already accepts.
    ///
    /// Expected: empty email_compra
    #[test]
    fn serializes_login_event_without_purchase_email() {
        let identity = DiscordIdentity {
            id: "42".to_string(),
            username: "buyer".to_string(),
            email: None,
            avatar: None,
        };
        let event = SinkEvent::login(None, &identity);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["email_compra"], "");
    }

    /// Tests the revocation event wire shape.
    ///
    /// Expected: REVOGACAO tipo tag with target and reason
    #[test]
    fn serializes_revocation_event() {
        let event = SinkEvent::revocation(42, "chargeback");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["tipo"], "REVOGACAO");
        assert_eq!(value["discord_id"], "42");
        assert_eq!(value["reason"], "chargeback");
    }
}
