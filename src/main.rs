use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info};

use digestbot::clients::auth::TokenManager;
use digestbot::clients::bot_client::BotClient;
use digestbot::clients::llm_client::SummaryClient;
use digestbot::commands::handle_command;
use digestbot::core::config::AppConfig;
use digestbot::registry::SubscriberRegistry;
use digestbot::setup_logging;
use digestbot::store::MessageStore;
use digestbot::worker::scheduler::RelayScheduler;

/// Long-poll window for incoming bot commands.
const UPDATES_TIMEOUT_SECS: u64 = 25;
/// Back-off after a failed update poll.
const UPDATES_RETRY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("config error: {}", e))?;

    // The store is the one dependency worth dying for: without it there is
    // no queue to drain.
    let store = MessageStore::connect(&config.database_path)
        .await
        .context("failed to open message store")?;
    store
        .init()
        .await
        .context("failed to initialize message store")?;

    let http = reqwest::Client::new();
    let registry = Arc::new(SubscriberRegistry::new());
    let bot = BotClient::new(http.clone(), &config.bot_token);

    let tokens = TokenManager::new(
        http.clone(),
        config.auth_url.clone(),
        config.llm_credentials.clone(),
        config.auth_scope.clone(),
    );
    let summarizer = SummaryClient::new(
        http.clone(),
        tokens,
        config.completion_url.clone(),
        config.model.clone(),
    );

    let scheduler = RelayScheduler::new(
        store.clone(),
        summarizer,
        bot.clone(),
        Arc::clone(&registry),
        config.poll_interval,
        config.idle_interval,
        config.per_item_delay,
    );
    tokio::spawn(scheduler.run());

    info!("digestbot is running");

    // Command loop: subscribe/unsubscribe/stats. Poll failures back off
    // and retry; they never take the relay down with them.
    let mut offset = 0i64;
    loop {
        match bot.get_updates(offset, UPDATES_TIMEOUT_SECS).await {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    let Some(incoming) = update.message else { continue };
                    let Some(text) = incoming.text else { continue };
                    if let Some(reply) =
                        handle_command(&registry, &store, incoming.chat.id, &text).await
                        && let Err(e) = bot.send_message(incoming.chat.id, &reply).await
                    {
                        error!(chat_id = incoming.chat.id, error = %e, "failed to reply to command");
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "update poll failed");
                tokio::time::sleep(UPDATES_RETRY).await;
            }
        }
    }
}
