//! HTTP transport seam.
//!
//! The dispatcher builds [`HttpRequest`] values as plain data and hands them
//! to a [`Transport`]. The outcome comes back as a tagged result so the retry
//! loop can tell timeouts apart from every other failure.

use std::future::Future;
use std::time::Duration;

use reqwest::header;

/// HTTP method for a request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Returns the first header value with the given name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A completed HTTP exchange. Any status code, success or not.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Failure to complete an HTTP exchange.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// Connect or read timeout. The only retryable condition.
    ///
    /// `status` is set when the status line arrived before the timeout.
    #[error("request timed out")]
    Timeout { status: Option<u16> },
    /// Any other network level failure.
    #[error("network error: {message}")]
    Network {
        status: Option<u16>,
        message: String,
    },
}

/// Sends a single request attempt.
///
/// Implementations must not retry on their own and must release any
/// connection state when the attempt finishes.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Waits between retry attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Backoff waits on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.url),
            HttpMethod::Post => self.http.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        // Connection: close releases the socket once the attempt ends.
        let response = builder
            .header(header::ACCEPT, "application/json")
            .header(header::CONNECTION, "close")
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|err| classify_error(err, None))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| classify_error(err, Some(status)))?;
        Ok(HttpResponse { status, body })
    }
}

/// Maps a `reqwest` failure, keeping any status already read off the wire.
fn classify_error(err: reqwest::Error, received: Option<u16>) -> TransportError {
    let status = received.or_else(|| err.status().map(|status| status.as_u16()));
    if err.is_timeout() {
        TransportError::Timeout { status }
    } else {
        TransportError::Network {
            status,
            message: err.to_string(),
        }
    }
}
