/// Errors that can occur when talking to an upstream data provider.
///
/// # Examples
///
/// ```rust
/// use floodwatch_feeds::error::FeedError;
///
/// let err = FeedError::MalformedPayload {
///     provider: "openweather",
///     detail: "missing main block".to_string(),
/// };
/// assert!(err.to_string().contains("openweather"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Non-2xx status code from the provider API.
    #[error("{provider} API HTTP error: status={status}")]
    HttpError { provider: &'static str, status: u16 },

    /// The provider answered 2xx but the payload is missing fields the
    /// contract requires.
    #[error("{provider} returned a malformed payload: {detail}")]
    MalformedPayload {
        provider: &'static str,
        detail: String,
    },

    /// An underlying HTTP transport error from `reqwest`.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The syndication XML could not be parsed.
    #[error("Feed parse error: {0}")]
    Syndication(#[from] rss::Error),

    /// JSON deserialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience type alias so callers can write `error::Result<T>`.
pub type Result<T> = std::result::Result<T, FeedError>;
