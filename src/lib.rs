//! `serpmetrics` is an async HTTP client for the SERPmetrics rank tracking API.
//!
//! Every request is signed with an HMAC-SHA256 of the current timestamp and
//! timeouts are retried with exponential backoff. Operations:
//! - [`SerpMetricsClient::add`] / [`SerpMetricsClient::remove`]
//! - [`SerpMetricsClient::priority_add`] / [`SerpMetricsClient::priority_status`]
//! - [`SerpMetricsClient::check`] / [`SerpMetricsClient::serp`]
//! - [`SerpMetricsClient::credit`] / [`SerpMetricsClient::flux`]
//!
//! Arbitrary endpoints go through [`SerpMetricsClient::dispatch`].

mod client;
mod credentials;
mod endpoints;
mod error;
mod options;
mod request;
mod types;

pub mod signature;
pub mod transport;

pub use client::{backoff_delay, SerpMetricsClient};
pub use credentials::Credentials;
pub use endpoints::{DEFAULT_CHECK_LIMIT, DEFAULT_FLUX_TYPE};
pub use error::SerpMetricsError;
pub use options::{ClientOptions, DEFAULT_API_URL, DEFAULT_USER_AGENT};
pub use request::{user_agent_header, RequestOptions};
pub use signature::Signature;
pub use types::{ApiResponse, Engines, OneOrMany};

pub type Result<T> = std::result::Result<T, SerpMetricsError>;
