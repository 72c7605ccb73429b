//! Wire DTOs shared between the HTTP surface, the Discord bot, and the
//! outbound webhook clients.

pub mod api;
pub mod discord;
pub mod event;
pub mod validation;
