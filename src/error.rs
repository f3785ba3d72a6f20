//! Error types for the budgetkit library.

/// All errors that can occur when using budgetkit.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// A caller-supplied argument is outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request could not be sent or its body could not be read.
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL or an endpoint path is malformed.
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a non-success status.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder if it could not be read.
        message: String,
    },

    /// A multi-step write failed after earlier steps already took effect
    /// on the server.
    #[error("{failed} failed after {completed} succeeded: {source}")]
    PartialWrite {
        /// Steps that were applied before the failure.
        completed: &'static str,
        /// Step that failed.
        failed: &'static str,
        /// Underlying failure of the failed step.
        source: Box<Self>,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, BudgetError>;
