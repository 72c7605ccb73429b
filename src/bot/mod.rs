//! Discord bot integration.
//!
//! The bot carries the entire ticket surface: it publishes the panel with the
//! open-ticket button, creates private ticket channels, and feeds channel
//! messages and button presses into the running dialogue sessions. It is
//! started from a separate tokio task so it never blocks the HTTP server.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - channel lifecycle events
//! - `GUILD_MESSAGES` - messages in ticket channels
//! - `MESSAGE_CONTENT` - privileged; required to read the submitted emails

pub mod handler;
pub mod start;
