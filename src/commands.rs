//! Subscriber command surface.
//!
//! Thin dispatch with no coordination logic: each command is one registry
//! or store operation plus a reply string.

use tracing::error;

use crate::core::models::RelayStats;
use crate::registry::SubscriberRegistry;
use crate::store::MessageStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Subscribe,
    Unsubscribe,
    Stats,
    Unknown,
}

pub fn parse_command(text: &str) -> Command {
    // Commands may arrive as "/cmd@BotName" in group chats; keep the
    // leading token only.
    let head = text.trim().split_whitespace().next().unwrap_or("");
    let head = head.split('@').next().unwrap_or("");
    match head {
        "/start" => Command::Start,
        "/subscribe" => Command::Subscribe,
        "/unsubscribe" => Command::Unsubscribe,
        "/stats" => Command::Stats,
        _ => Command::Unknown,
    }
}

pub fn render_stats(stats: &RelayStats) -> String {
    format!(
        "Messages stored: {}\nMessages relayed: {}\nLast relayed: {}",
        stats.total_messages,
        stats.summarized_messages,
        stats.last_summarized.as_deref().unwrap_or("never"),
    )
}

/// Handle one incoming message, returning the reply to send back. Unknown
/// text gets no reply so the bot stays quiet in group chats.
pub async fn handle_command(
    registry: &SubscriberRegistry,
    store: &MessageStore,
    chat_id: i64,
    text: &str,
) -> Option<String> {
    match parse_command(text) {
        Command::Start => Some(
            "Hi! I relay digests of new messages from the monitored chats.\n\
             Use /subscribe to start receiving them and /unsubscribe to stop."
                .to_string(),
        ),
        Command::Subscribe => {
            if registry.add(chat_id).await {
                Some("Monitoring started! You will receive digests of new messages.".to_string())
            } else {
                Some("You are already subscribed.".to_string())
            }
        }
        Command::Unsubscribe => {
            registry.remove(chat_id).await;
            Some("Monitoring stopped.".to_string())
        }
        Command::Stats => match store.stats().await {
            Ok(stats) => Some(render_stats(&stats)),
            Err(e) => {
                error!(error = %e, "failed to read relay stats");
                Some("Stats are unavailable right now.".to_string())
            }
        },
        Command::Unknown => None,
    }
}
