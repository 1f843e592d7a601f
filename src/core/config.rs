use std::env;
use std::time::Duration;

/// Default OAuth endpoint of the completion provider.
const DEFAULT_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
/// Default chat-completions endpoint.
const DEFAULT_COMPLETION_URL: &str =
    "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";
const DEFAULT_AUTH_SCOPE: &str = "GIGACHAT_API_PERS";
const DEFAULT_MODEL: &str = "GigaChat";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub bot_token: String,
    /// Pre-encoded Basic authorization blob for the auth endpoint.
    pub llm_credentials: String,
    pub auth_url: String,
    pub auth_scope: String,
    pub completion_url: String,
    pub model: String,
    pub poll_interval: Duration,
    pub idle_interval: Duration,
    pub per_item_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "messages.db".to_string()),
            bot_token: env::var("BOT_TOKEN").map_err(|e| format!("BOT_TOKEN: {}", e))?,
            llm_credentials: env::var("LLM_CREDENTIALS")
                .map_err(|e| format!("LLM_CREDENTIALS: {}", e))?,
            auth_url: env::var("AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string()),
            auth_scope: env::var("AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_AUTH_SCOPE.to_string()),
            completion_url: env::var("COMPLETION_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            poll_interval: Duration::from_secs(env_secs("POLL_INTERVAL_SECS", 10)),
            idle_interval: Duration::from_secs(env_secs("IDLE_INTERVAL_SECS", 5)),
            per_item_delay: Duration::from_secs(env_secs("PER_ITEM_DELAY_SECS", 1)),
        })
    }
}

fn env_secs(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
