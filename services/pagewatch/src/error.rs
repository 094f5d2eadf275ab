//! Error types for the page checker

/// Errors that can occur while checking pages
#[derive(Debug, thiserror::Error)]
pub enum PagewatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown requirement: {0}")]
    UnknownRequirement(String),

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Status server error: {0}")]
    Dashboard(String),
}

/// Result type alias for page checker operations
pub type Result<T> = std::result::Result<T, PagewatchError>;
