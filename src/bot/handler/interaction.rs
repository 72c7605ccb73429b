use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction,
};

use crate::bot::handler::Handler;
use crate::service::ticket::{
    session::SessionEvent, OpenTicketOutcome, TicketService, BUTTON_OPEN,
};

impl Handler {
    pub(super) async fn on_interaction(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };

        if component.data.custom_id == BUTTON_OPEN {
            self.open_ticket(&ctx, &component).await;
            return;
        }

        // Dialogue buttons: acknowledge so Discord stops the spinner, then
        // hand the press to the channel's session.
        if let Err(e) = component
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            tracing::debug!("component acknowledgement failed: {}", e);
        }

        self.sessions.dispatch(
            component.channel_id.get(),
            SessionEvent::Button {
                user_id: component.user.id.get(),
                custom_id: component.data.custom_id.clone(),
            },
        );
    }

    async fn open_ticket(&self, ctx: &Context, component: &ComponentInteraction) {
        let service = TicketService::new(
            self.config.clone(),
            self.directory.clone(),
            self.validator.clone(),
            self.sink.clone(),
            self.sessions.clone(),
        );

        let content = match service
            .open(
                ctx.http.clone(),
                component.user.id.get(),
                &component.user.name,
            )
            .await
        {
            Ok(OpenTicketOutcome::Opened(channel_id)) => {
                format!("Your ticket is ready: <#{}>", channel_id)
            }
            Ok(OpenTicketOutcome::AlreadyOpen) => "You already have an open ticket.".to_string(),
            Err(e) => {
                tracing::error!(
                    "ticket creation failed for user {}: {}",
                    component.user.id,
                    e
                );
                "Something went wrong while opening your ticket. Please try again.".to_string()
            }
        };

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        );
        if let Err(e) = component.create_response(&ctx.http, response).await {
            tracing::warn!("open-ticket response not delivered: {}", e);
        }
    }
}
