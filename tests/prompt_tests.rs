use digestbot::prompt::{build_summary_prompt, render_fallback, render_notification};

#[test]
fn summary_prompt_names_chat_sender_and_text() {
    let prompt = build_summary_prompt("Alice", "Team", "Hello");
    assert!(prompt.contains("chat 'Team'"));
    assert!(prompt.contains("user 'Alice'"));
    assert!(prompt.ends_with("Hello"));
}

#[test]
fn notification_contains_chat_sender_and_summary() {
    let notification = render_notification("Team", "Alice", "Greeting");
    assert!(notification.contains("Team"));
    assert!(notification.contains("Alice"));
    assert!(notification.contains("Greeting"));
}

#[test]
fn fallback_carries_the_raw_text() {
    let notification = render_fallback("Team", "Alice", "Hello everyone");
    assert!(notification.contains("Team"));
    assert!(notification.contains("Alice"));
    assert!(notification.contains("Hello everyone"));
    assert!(notification.contains("summary unavailable"));
}

#[test]
fn fallback_and_summary_notifications_are_distinguishable() {
    let summary = render_notification("Team", "Alice", "Greeting");
    let fallback = render_fallback("Team", "Alice", "Greeting");
    assert_ne!(summary, fallback);
}
