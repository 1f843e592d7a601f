pub mod auth;
pub mod bot_client;
pub mod llm_client;
