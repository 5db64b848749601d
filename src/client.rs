use std::env::VarError;
use std::fmt;
use std::sync::{
    atomic::{AtomicU16, Ordering},
    Arc,
};
use std::time::Duration;

use crate::{
    request::build_request,
    signature::{sign, Clock, SystemClock},
    transport::{ReqwestTransport, Sleeper, TokioSleeper, Transport, TransportError},
    ApiResponse, ClientOptions, Credentials, RequestOptions, Result, SerpMetricsError,
};

/// Computes the wait before retrying after failed attempt `attempt`.
///
/// Attempts are numbered from 1, so with the default 100 ms base the waits
/// are 200 ms, 400 ms, 800 ms and so on.
pub fn backoff_delay(attempt: usize, base_ms: u64) -> Duration {
    let exp = attempt.min(16) as u32;
    let multiplier = 1u64 << exp;
    Duration::from_millis(base_ms.saturating_mul(multiplier))
}

/// Signed HTTP client for the SERPmetrics API.
///
/// Clones share the last-status slot reported by
/// [`SerpMetricsClient::last_http_status`].
#[derive(Clone)]
pub struct SerpMetricsClient<T = ReqwestTransport, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    clock: Arc<dyn Clock>,
    credentials: Credentials,
    options: ClientOptions,
    last_status: Arc<AtomicU16>,
}

impl<T, S> fmt::Debug for SerpMetricsClient<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerpMetricsClient")
            .field("credentials", &self.credentials)
            .field("options", &self.options)
            .field("last_http_status", &self.last_http_status())
            .finish()
    }
}

impl SerpMetricsClient {
    /// Creates a client for the default API endpoint.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            transport: ReqwestTransport::new(),
            sleeper: TokioSleeper,
            clock: Arc::new(SystemClock),
            credentials,
            options: ClientOptions::default(),
            last_status: Arc::new(AtomicU16::new(0)),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `SERPMETRICS_KEY`: API key
    /// - `SERPMETRICS_SECRET`: shared signing secret
    /// - `SERPMETRICS_API_URL`: optional base URL override
    ///
    /// # Example
    ///
    /// ```no_run
    /// use serpmetrics::SerpMetricsClient;
    ///
    /// let client = SerpMetricsClient::from_env().expect("missing SERPMETRICS_* env vars");
    /// ```
    pub fn from_env() -> Result<Self> {
        let client = Self::new(Credentials::from_env()?);
        match std::env::var("SERPMETRICS_API_URL") {
            Ok(api_url) if api_url.trim().is_empty() => Err(SerpMetricsError::Config(
                "SERPMETRICS_API_URL is set but empty".to_owned(),
            )),
            Ok(api_url) => {
                let options = ClientOptions {
                    api_url,
                    ..ClientOptions::default()
                };
                Ok(client.with_options(options))
            }
            Err(VarError::NotPresent) => Ok(client),
            Err(VarError::NotUnicode(_)) => Err(SerpMetricsError::Config(
                "SERPMETRICS_API_URL is not valid unicode".to_owned(),
            )),
        }
    }
}

impl<T, S> SerpMetricsClient<T, S> {
    /// Applies client options such as base URL, timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Replaces the HTTP transport.
    pub fn with_transport<U>(self, transport: U) -> SerpMetricsClient<U, S> {
        SerpMetricsClient {
            transport,
            sleeper: self.sleeper,
            clock: self.clock,
            credentials: self.credentials,
            options: self.options,
            last_status: self.last_status,
        }
    }

    /// Replaces the backoff sleeper.
    pub fn with_sleeper<U>(self, sleeper: U) -> SerpMetricsClient<T, U> {
        SerpMetricsClient {
            transport: self.transport,
            sleeper,
            clock: self.clock,
            credentials: self.credentials,
            options: self.options,
            last_status: self.last_status,
        }
    }

    /// Replaces the clock used for signature timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Status code of the most recent attempt that produced one.
    ///
    /// Best-effort diagnostic: concurrent calls race and the last writer wins.
    pub fn last_http_status(&self) -> Option<u16> {
        match self.last_status.load(Ordering::Relaxed) {
            0 => None,
            status => Some(status),
        }
    }

    /// Alias for [`SerpMetricsClient::last_http_status`].
    pub fn http_status(&self) -> Option<u16> {
        self.last_http_status()
    }

    fn record_status(&self, status: u16) {
        self.last_status.store(status, Ordering::Relaxed);
    }
}

impl<T: Transport, S: Sleeper> SerpMetricsClient<T, S> {
    /// Sends a signed request with the client's own credentials.
    pub async fn dispatch(&self, options: RequestOptions) -> Result<ApiResponse> {
        self.dispatch_with_credentials(options, None).await
    }

    /// Sends a signed request, retrying timeouts with exponential backoff.
    ///
    /// `credentials` overrides the client's credentials for this call only.
    /// Every attempt is signed afresh. Non-timeout failures and non-2xx
    /// statuses end the call immediately.
    pub async fn dispatch_with_credentials(
        &self,
        options: RequestOptions,
        credentials: Option<&Credentials>,
    ) -> Result<ApiResponse> {
        let credentials = credentials.unwrap_or(&self.credentials);
        let timeout = Duration::from_millis(self.options.timeout_ms);
        let mut attempt = 1usize;

        loop {
            let signature = sign(credentials, &*self.clock)?;
            let request = build_request(
                &options,
                &self.options.api_url,
                credentials,
                &signature,
                &self.options.user_agent,
                timeout,
            )?;

            match self.transport.send(request).await {
                Ok(response) => {
                    self.record_status(response.status);

                    if !(200..300).contains(&response.status) {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            "{} returned http status {}",
                            options.path,
                            response.status
                        );

                        return Err(SerpMetricsError::Http {
                            status: response.status,
                            body: response.body,
                        });
                    }

                    let body = serde_json::from_str(&response.body).map_err(|err| {
                        SerpMetricsError::Decode(format!(
                            "invalid response JSON: {err}; body: {}",
                            response.body
                        ))
                    })?;
                    return Ok(ApiResponse {
                        status: response.status,
                        body,
                    });
                }
                Err(TransportError::Timeout { status }) => {
                    if let Some(status) = status {
                        self.record_status(status);
                    }
                    if attempt > self.options.retries {
                        return Err(SerpMetricsError::RetriesExhausted { attempts: attempt });
                    }
                    self.wait_before_retry(attempt).await;
                    attempt += 1;
                }
                Err(TransportError::Network { status, message }) => {
                    if let Some(status) = status {
                        self.record_status(status);
                    }
                    return Err(SerpMetricsError::Transport { status, message });
                }
            }
        }
    }

    async fn wait_before_retry(&self, attempt: usize) {
        let delay = backoff_delay(attempt, self.options.retry_backoff_ms);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "attempt {} timed out, retrying after {} ms",
            attempt,
            delay.as_millis()
        );

        self.sleeper.sleep(delay).await;
    }
}
