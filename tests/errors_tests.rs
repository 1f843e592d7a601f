use std::error::Error;

use digestbot::errors::RelayError;

#[test]
fn relay_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = RelayError::Store("test error".to_string());
    assert_error(&error);
}

#[test]
fn relay_error_display() {
    let error = RelayError::Store("table missing".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to query message store: table missing"
    );

    let error = RelayError::Auth("endpoint returned 401".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to obtain access token: endpoint returned 401"
    );

    let error = RelayError::Llm("no choices".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access completion endpoint: no choices"
    );

    let error = RelayError::Delivery("chat unreachable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to deliver notification: chat unreachable"
    );
}

#[test]
fn relay_error_from_conversions() {
    let err: RelayError = sqlx::Error::RowNotFound.into();
    match err {
        RelayError::Store(msg) => assert!(!msg.is_empty()),
        _ => panic!("Unexpected error type"),
    }

    // Verifies the reqwest conversion exists without needing to construct
    // a reqwest::Error by hand.
    #[allow(unused)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> RelayError {
        RelayError::from(err)
    }
}
