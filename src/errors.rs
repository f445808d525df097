use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummoError {
    #[error("Failed to parse chat store: {0}")]
    ParseError(String),

    #[error("Failed to access chat store: {0}")]
    StoreError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("OpenAI API returned {status} {reason}")]
    OpenAIStatus { status: u16, reason: String },

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl From<std::io::Error> for SummoError {
    fn from(error: std::io::Error) -> Self {
        SummoError::StoreError(error.to_string())
    }
}

impl From<serde_json::Error> for SummoError {
    fn from(error: serde_json::Error) -> Self {
        SummoError::ParseError(error.to_string())
    }
}
