use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hotspots::bot::{self, SessionRegistry, TelegramMessenger};
use hotspots::config::{BotConfig, BotSettings};

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;
    init_tracing(config.json_logs);

    info!(language = %config.language, "Starting Hotspots Telegram Bot");

    let settings = Arc::new(BotSettings::from_config(&config)?);
    let registry = Arc::new(SessionRegistry::new(settings));

    // Initialize the bot
    let bot = Bot::new(&config.token);
    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(bot::message_handler))
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![registry, messenger])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
