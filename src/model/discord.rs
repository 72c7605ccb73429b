use serde::Deserialize;

/// Identity payload returned by Discord's `/users/@me` endpoint.
///
/// Only the fields the login flow forwards are kept. The id is a snowflake
/// serialized as a string on the wire; `parsed_id` converts it when a numeric
/// identifier is needed for directory mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordIdentity {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl DiscordIdentity {
    pub fn parsed_id(&self) -> Option<u64> {
        self.id.parse::<u64>().ok()
    }
}
