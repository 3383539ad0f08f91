use anyhow::Result;
use buyerchina_bot::bot::{self, AppState};
use buyerchina_bot::config::AppConfig;
use buyerchina_bot::dialogue::{IntakeDialogue, IntakeState};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use teloxide::update_listeners::Polling;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// How often the background health check pings the Telegram API
const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(300);

/// Periodically verify the bot can still reach the Telegram API
fn start_health_check_task(bot: Bot) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEALTH_CHECK_INTERVAL);
        // The first tick fires immediately; skip it since startup already
        // verified connectivity.
        interval.tick().await;
        loop {
            interval.tick().await;
            match bot.get_me().await {
                Ok(me) => {
                    info!(bot_username = ?me.username(), "Health check passed");
                }
                Err(e) => {
                    warn!(error = %e, "Health check failed, Telegram API unreachable");
                }
            }
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Validate configuration early so misconfiguration fails fast
    let config = AppConfig::from_env()?;
    config.validate()?;

    if !config.manager.notify_enabled() {
        warn!("MANAGER_CHAT_ID not set, manager notifications are disabled");
    }
    if config.sheets.is_none() {
        warn!("Google Sheets credentials not set, ledger is disabled");
    }

    // Custom client configuration for better reliability
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.bot.http_timeout_secs))
        .build()?;

    let bot = Bot::with_client(config.bot.token.clone(), client.clone());

    let me = bot.get_me().await?;
    info!(bot_username = ?me.username(), "Bot authenticated, starting dispatcher");

    let webhook_config = config.webhook.clone();
    let state = Arc::new(AppState::from_config(config, bot.clone(), client)?);

    let _health_check_handle = start_health_check_task(bot.clone());

    // Create shared dialogue storage
    let dialogue_storage = InMemStorage::<IntakeState>::new();

    // Set up the dispatcher with shared state and dialogue support
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let state = Arc::clone(&state);
            let storage = dialogue_storage.clone();
            move |bot: Bot, msg: Message| {
                let state = Arc::clone(&state);
                let dialogue = IntakeDialogue::new(storage.clone(), msg.chat.id);
                async move { bot::message_handler(bot, msg, state, dialogue).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let state = Arc::clone(&state);
            let storage = dialogue_storage.clone();
            move |bot: Bot, q: CallbackQuery| {
                let state = Arc::clone(&state);
                // Use the chat id of the message that carried the keyboard
                let chat_id = match &q.message {
                    Some(teloxide::types::MaybeInaccessibleMessage::Regular(msg)) => msg.chat.id,
                    _ => ChatId::from(q.from.id),
                };
                let dialogue = IntakeDialogue::new(storage.clone(), chat_id);
                async move { bot::callback_handler(bot, q, state, dialogue).await }
            }
        }));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .enable_ctrlc_handler()
        .build();

    match webhook_config {
        Some(webhook) => {
            let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, webhook.port));
            let url = webhook.public_url.parse::<reqwest::Url>()?;
            info!(url = %url, port = webhook.port, "Starting in webhook mode");

            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url)).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("Webhook update listener error"),
                )
                .await;
        }
        None => {
            info!("Starting in long-polling mode");
            let listener = Polling::builder(bot).drop_pending_updates().build();
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("Polling update listener error"),
                )
                .await;
        }
    }

    Ok(())
}
