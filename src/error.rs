/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SerpMetricsError {
    /// Missing or empty credentials, or other client misconfiguration.
    #[error("configuration error: {0}")]
    Config(String),
    /// Request parameters could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),
    /// Non-timeout network failure reported by the transport.
    #[error("transport error: {message}")]
    Transport {
        /// Status code attached to the failure, if the transport had one.
        status: Option<u16>,
        /// Error message text from the transport.
        message: String,
    },
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Every attempt timed out.
    #[error("request timed out after {attempts} attempts")]
    RetriesExhausted { attempts: usize },
    /// Response body was not valid JSON.
    #[error("decode error: {0}")]
    Decode(String),
}

impl SerpMetricsError {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
