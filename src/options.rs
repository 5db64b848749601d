/// Default SERPmetrics API base URL.
pub const DEFAULT_API_URL: &str = "http://api.serpmetrics.com";

/// Default identifying `User-Agent` prefix. The crate version is appended.
pub const DEFAULT_USER_AGENT: &str = "SERPmetrics Rust Library";

/// Configures endpoint, timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// API base URL; request paths are appended verbatim.
    pub api_url: String,
    /// Library identifier sent as `User-Agent`.
    pub user_agent: String,
    /// Maximum number of retries after the initial attempt.
    ///
    /// Only timeouts are retried.
    pub retries: usize,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub retry_backoff_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            retries: 3,
            timeout_ms: 10_000,
            retry_backoff_ms: 100,
        }
    }
}
