use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to query message store: {0}")]
    Store(String),

    #[error("Failed to obtain access token: {0}")]
    Auth(String),

    #[error("Failed to access completion endpoint: {0}")]
    Llm(String),

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Failed to deliver notification: {0}")]
    Delivery(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::Http(error.to_string())
    }
}

impl From<sqlx::Error> for RelayError {
    fn from(error: sqlx::Error) -> Self {
        RelayError::Store(error.to_string())
    }
}
