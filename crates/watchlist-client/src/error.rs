use thiserror::Error;

/// The request never produced an HTTP response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Failure of a single API call. Unparsable bodies are not an error: they
/// surface as `None` data on an otherwise successful call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    /// Non-2xx status, with the server's `error`/`message` text when present
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or(ApiError::GENERIC_FAILURE))]
    Http { status: u16, message: Option<String> },

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub const NETWORK_FAILURE: &'static str = "Network error";
    pub const GENERIC_FAILURE: &'static str = "Request failed";

    /// Text shown inline to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => Self::NETWORK_FAILURE.to_string(),
            ApiError::Http { message, .. } => message
                .clone()
                .unwrap_or_else(|| Self::GENERIC_FAILURE.to_string()),
            ApiError::Encode(_) => Self::GENERIC_FAILURE.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
