use thiserror::Error;

/// Errors returned by the Gloma API client.
#[derive(Debug, Error)]
pub enum GlomaError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream API answered with a non-success HTTP status.
    ///
    /// Carries the original status code and body text so callers can
    /// surface them verbatim rather than reinterpreting the failure.
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("json deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
