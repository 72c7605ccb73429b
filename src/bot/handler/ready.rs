use serenity::all::{
    ActivityData, ButtonStyle, ChannelId, Context, CreateActionRow, CreateButton, CreateMessage,
    GetMessages, Ready,
};

use crate::bot::handler::Handler;
use crate::service::ticket::BUTTON_OPEN;

const PANEL_TEXT: &str =
    "Bought VIP access? Open a ticket below and we will validate your purchase.";

impl Handler {
    pub(super) async fn on_ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);

        ctx.set_activity(Some(ActivityData::custom("Guarding the gate")));

        let Some(panel_channel_id) = self.config.ticket_panel_channel_id else {
            return;
        };
        let channel_id = ChannelId::new(panel_channel_id);

        // A panel from a previous run survives restarts; don't stack another
        // one on top of it.
        match channel_id
            .messages(&ctx.http, GetMessages::new().limit(20))
            .await
        {
            Ok(messages) => {
                let already_published = messages
                    .iter()
                    .any(|m| m.author.id == ready.user.id && !m.components.is_empty());
                if already_published {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!("could not inspect panel channel {}: {}", panel_channel_id, e);
                return;
            }
        }

        let panel = CreateMessage::new()
            .content(PANEL_TEXT)
            .components(vec![CreateActionRow::Buttons(vec![CreateButton::new(
                BUTTON_OPEN,
            )
            .label("Open ticket")
            .style(ButtonStyle::Primary)])]);

        if let Err(e) = channel_id.send_message(&ctx.http, panel).await {
            tracing::error!(
                "ticket panel not published in channel {}: {}",
                panel_channel_id,
                e
            );
        }
    }
}
