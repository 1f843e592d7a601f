use chrono::Utc;
use digestbot::clients::auth::{CachedToken, TOKEN_EXPIRY_MARGIN_SECS, normalize_expiry};

#[test]
fn millisecond_and_second_expiry_normalize_to_the_same_instant() {
    assert_eq!(
        normalize_expiry(1_999_999_999_999),
        normalize_expiry(1_999_999_999)
    );
    assert_eq!(normalize_expiry(1_999_999_999_999), 1_999_999_999);
}

#[test]
fn second_scale_values_pass_through_unchanged() {
    assert_eq!(normalize_expiry(1_700_000_000), 1_700_000_000);
    assert_eq!(normalize_expiry(999_999_999_999), 999_999_999_999);
}

#[test]
fn token_well_before_expiry_is_reused() {
    let now = Utc::now().timestamp();
    let token = CachedToken {
        token: "abc".to_string(),
        expires_at: now + 3600,
    };
    assert!(token.is_fresh_at(now));
}

#[test]
fn expired_token_triggers_refetch() {
    let now = Utc::now().timestamp();
    let token = CachedToken {
        token: "abc".to_string(),
        expires_at: now - 1,
    };
    assert!(!token.is_fresh_at(now));
}

#[test]
fn token_inside_the_safety_margin_counts_as_expired() {
    let now = Utc::now().timestamp();
    let at_margin = CachedToken {
        token: "abc".to_string(),
        expires_at: now + TOKEN_EXPIRY_MARGIN_SECS,
    };
    assert!(!at_margin.is_fresh_at(now));

    let just_outside = CachedToken {
        token: "abc".to_string(),
        expires_at: now + TOKEN_EXPIRY_MARGIN_SECS + 1,
    };
    assert!(just_outside.is_fresh_at(now));
}
