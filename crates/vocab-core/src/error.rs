use std::time::Duration;

/// Failure reaching a dictionary provider
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Whether a caller may reasonably try the same request again later
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout(_) => true,
            FetchError::Http { status, .. } => *status == 429 || *status >= 500,
            FetchError::Network(_) => false,
        }
    }
}

/// Provider bytes that don't match the expected shape
#[derive(Debug, thiserror::Error)]
#[error("Failed to parse {provider} response: {source}")]
pub struct ParseError {
    pub provider: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl ParseError {
    pub fn new(provider: &'static str, source: serde_json::Error) -> Self {
        Self { provider, source }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Nothing found for '{0}'")]
    NotFound(String),

    #[error("No dictionary providers configured")]
    NoProviders,
}

/// Save action on an expired, unknown or already consumed token
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Save token '{token}' not found or expired")]
pub struct TokenNotFound {
    pub token: String,
}
