use std::fmt;

use crate::{Result, SerpMetricsError};

/// API key and shared secret issued by SERPmetrics.
///
/// The secret never leaves the client; it only keys the request signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Reads credentials from `SERPMETRICS_KEY` and `SERPMETRICS_SECRET`.
    pub fn from_env() -> Result<Self> {
        let key = read_env("SERPMETRICS_KEY")?;
        let secret = read_env("SERPMETRICS_SECRET")?;
        Ok(Self::new(key, secret))
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Fails with [`SerpMetricsError::Config`] if either field is blank.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(SerpMetricsError::Config("api key is empty".to_owned()));
        }
        if self.secret.trim().is_empty() {
            return Err(SerpMetricsError::Config("api secret is empty".to_owned()));
        }
        Ok(())
    }
}

fn read_env(name: &str) -> Result<String> {
    let value = std::env::var(name)
        .map_err(|_| SerpMetricsError::Config(format!("missing {name} environment variable")))?;
    if value.trim().is_empty() {
        return Err(SerpMetricsError::Config(format!("{name} is set but empty")));
    }
    Ok(value)
}
