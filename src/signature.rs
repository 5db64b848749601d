use std::time::{SystemTime, UNIX_EPOCH};

use aws_lc_rs::hmac;
use base64::prelude::*;

use crate::{Credentials, Result};

/// Source of the unix timestamp bound into each signature.
pub trait Clock: Send + Sync {
    /// Current unix time in whole seconds, truncated.
    fn now_unix(&self) -> i64;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// Clock frozen at a given unix timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// Time-bound proof of possession of the API secret.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub timestamp: i64,
    pub signature: String,
}

/// Signs the current timestamp with the credentials' secret.
///
/// Returns [`crate::SerpMetricsError::Config`] if the credentials are blank.
pub fn sign(credentials: &Credentials, clock: &dyn Clock) -> Result<Signature> {
    credentials.validate()?;
    let timestamp = clock.now_unix();
    Ok(Signature {
        timestamp,
        signature: sign_at(credentials.secret(), timestamp),
    })
}

/// Base64 HMAC-SHA256 of the decimal `timestamp`, keyed by `secret`.
pub fn sign_at(secret: &str, timestamp: i64) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, timestamp.to_string().as_bytes());
    BASE64_STANDARD
        .encode(tag.as_ref())
        .trim_end_matches('\n')
        .to_owned()
}
