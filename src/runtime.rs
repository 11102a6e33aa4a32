use std::sync::Arc;

use serenity::model::gateway::GatewayIntents;
use tracing::{error, info};

use crate::clients::hebe::HebeClient;
use crate::config::Settings;
use crate::error::StartupError;
use crate::handlers::discord::BotHandler;

pub fn build_handler(settings: &Settings) -> BotHandler {
    let source = HebeClient::new(settings.register_url.clone(), settings.apiap.clone());
    BotHandler::new(Arc::new(source), settings.timezone)
}

/// Runs until the gateway connection ends. Failing to build or start the
/// client is returned so the process exits non-zero.
pub async fn run_bot(settings: &Settings) -> Result<(), StartupError> {
    let token = settings.require_discord_token()?;
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    info!("Starting Discord bot...");
    let mut client = serenity::Client::builder(token, intents)
        .event_handler(build_handler(settings))
        .await
        .inspect_err(|why| error!("Error creating Serenity client: {:?}", why))?;

    client
        .start()
        .await
        .inspect_err(|why| error!("Client error: {:?}", why))?;
    Ok(())
}
