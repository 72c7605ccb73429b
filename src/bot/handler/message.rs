use serenity::all::{Context, Message};

use crate::bot::handler::Handler;
use crate::service::ticket::session::SessionEvent;

impl Handler {
    /// Routes guild messages into ticket sessions.
    ///
    /// Messages in channels without a session fall through silently; that is
    /// every channel in the guild except open tickets.
    pub(super) async fn on_message(&self, _ctx: Context, message: Message) {
        if message.author.bot {
            return;
        }

        self.sessions.dispatch(
            message.channel_id.get(),
            SessionEvent::Message {
                user_id: message.author.id.get(),
                content: message.content.clone(),
            },
        );
    }
}
