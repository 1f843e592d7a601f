//! Prompt and notification templates.

/// Single-message summarization prompt sent to the completion endpoint.
pub fn build_summary_prompt(sender: &str, chat_title: &str, text: &str) -> String {
    format!(
        "Produce a brief summary of the following message from chat '{}' by user '{}':\n\n{}",
        chat_title, sender, text
    )
}

/// Notification carrying a model-generated summary.
pub fn render_notification(chat_title: &str, sender: &str, summary: &str) -> String {
    format!(
        "📢 *New message in {}*\n👤 *From:* {}\n\n📝 *Summary:*\n{}",
        chat_title, sender, summary
    )
}

/// Notification used when summarization is unavailable. Carries the raw
/// text so subscribers get an explicit degraded message, never silence.
pub fn render_fallback(chat_title: &str, sender: &str, text: &str) -> String {
    format!(
        "📢 *New message in {}*\n👤 *From:* {}\n\n(summary unavailable, original text):\n{}",
        chat_title, sender, text
    )
}
