use std::time::Duration;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{
    transport::{HttpMethod, HttpRequest},
    Credentials, Result, SerpMetricsError, Signature,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Endpoint options handed to the dispatcher.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// Path appended to the base URL.
    pub path: String,
    /// Endpoint parameters, JSON-encoded into the `params` field.
    pub params: Option<JsonValue>,
    pub method: HttpMethod,
    /// Overrides the configured base URL.
    pub url: Option<String>,
}

impl RequestOptions {
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: JsonValue) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    fn path_or_root(&self) -> &str {
        if self.path.is_empty() {
            "/"
        } else {
            &self.path
        }
    }
}

/// Signed fields sent with every request, in wire order.
#[derive(Debug, Serialize)]
struct AuthPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a str>,
    key: &'a str,
    auth: &'a str,
    ts: i64,
}

/// JSON-encodes `params`, treating null and empty containers as absent.
pub(crate) fn encode_params(params: Option<&JsonValue>) -> Result<Option<String>> {
    let Some(params) = params else {
        return Ok(None);
    };
    let empty = match params {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(values) => values.is_empty(),
        JsonValue::String(value) => value.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(None);
    }
    serde_json::to_string(params)
        .map(Some)
        .map_err(|err| SerpMetricsError::Encode(format!("invalid params: {err}")))
}

/// URL-encodes the signed payload.
pub(crate) fn encode_payload(
    params: Option<&str>,
    credentials: &Credentials,
    signature: &Signature,
) -> Result<String> {
    let payload = AuthPayload {
        params,
        key: &credentials.key,
        auth: signature.signature.trim_end_matches('\n'),
        ts: signature.timestamp,
    };
    serde_urlencoded::to_string(&payload)
        .map_err(|err| SerpMetricsError::Encode(format!("invalid payload: {err}")))
}

/// Formats the identifying `User-Agent` value.
pub fn user_agent_header(user_agent: &str) -> String {
    format!("{user_agent} v{}", env!("CARGO_PKG_VERSION"))
}

/// Assembles one signed attempt.
///
/// GET requests carry the payload in the query string, POST requests in a
/// form-encoded body.
pub(crate) fn build_request(
    options: &RequestOptions,
    base_url: &str,
    credentials: &Credentials,
    signature: &Signature,
    user_agent: &str,
    timeout: Duration,
) -> Result<HttpRequest> {
    let params = encode_params(options.params.as_ref())?;
    let payload = encode_payload(params.as_deref(), credentials, signature)?;

    let base = options.url.as_deref().unwrap_or(base_url);
    let url = format!("{base}{}", options.path_or_root());
    let mut headers = vec![("User-Agent".to_owned(), user_agent_header(user_agent))];

    let (url, body) = match options.method {
        HttpMethod::Get => (format!("{url}?{payload}"), None),
        HttpMethod::Post => {
            headers.push(("Content-Type".to_owned(), FORM_CONTENT_TYPE.to_owned()));
            (url, Some(payload))
        }
    };

    Ok(HttpRequest {
        method: options.method,
        url,
        headers,
        body,
        timeout,
    })
}
