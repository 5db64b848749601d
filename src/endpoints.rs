//! Named SERPmetrics operations.

use serde_json::{json, Value as JsonValue};

use crate::{
    transport::{Sleeper, Transport},
    Engines, OneOrMany, RequestOptions, Result, SerpMetricsClient,
};

/// Default number of checks returned by [`SerpMetricsClient::check`].
pub const DEFAULT_CHECK_LIMIT: u32 = 10;

/// Default flux trend type.
pub const DEFAULT_FLUX_TYPE: &str = "daily";

pub(crate) fn add_options(keyword: OneOrMany, engines: Engines) -> RequestOptions {
    RequestOptions::post("/keywords/add")
        .with_params(json!({ "keyword": keyword, "engines": engines }))
}

pub(crate) fn remove_options(keyword_id: OneOrMany) -> RequestOptions {
    RequestOptions::post("/keywords/delete").with_params(json!({ "keyword_id": keyword_id }))
}

pub(crate) fn priority_add_options(keyword: OneOrMany, engines: Engines) -> RequestOptions {
    RequestOptions::post("/priority/add")
        .with_params(json!({ "keyword": keyword, "engines": engines }))
}

pub(crate) fn priority_status_options(priority_id: &str) -> RequestOptions {
    RequestOptions::post("/priority/status").with_params(json!({ "priority_id": priority_id }))
}

pub(crate) fn check_options(keyword_id: &str, engine: &str, limit: u32) -> RequestOptions {
    RequestOptions::get("/keywords/check").with_params(json!({
        "keyword_id": keyword_id,
        "engine": engine,
        "limit": limit,
    }))
}

pub(crate) fn serp_options(check_id: &str, domain: Option<&str>) -> RequestOptions {
    RequestOptions::post("/keywords/serp")
        .with_params(json!({ "check_id": check_id, "domain": domain }))
}

pub(crate) fn credit_options() -> RequestOptions {
    RequestOptions::post("/users/credit")
}

pub(crate) fn flux_options(engine_code: &str, kind: &str) -> RequestOptions {
    RequestOptions::post("/flux/trend")
        .with_params(json!({ "engine_code": engine_code, "type": kind }))
}

impl<T: Transport, S: Sleeper> SerpMetricsClient<T, S> {
    async fn call(&self, options: RequestOptions) -> Result<JsonValue> {
        Ok(self.dispatch(options).await?.body)
    }

    /// Queues one or more keywords for tracking on the given engines.
    ///
    /// Engines are `{engine}_{locale}` strings such as `google_en-us`.
    pub async fn add(
        &self,
        keyword: impl Into<OneOrMany>,
        engines: impl Into<Engines>,
    ) -> Result<JsonValue> {
        self.call(add_options(keyword.into(), engines.into())).await
    }

    /// Removes keywords from the queue, including every assigned engine.
    ///
    /// To change a keyword's engines call [`SerpMetricsClient::add`] again.
    pub async fn remove(&self, keyword_id: impl Into<OneOrMany>) -> Result<JsonValue> {
        self.call(remove_options(keyword_id.into())).await
    }

    /// Queues keywords on the priority queue. Arguments as for `add`.
    pub async fn priority_add(
        &self,
        keyword: impl Into<OneOrMany>,
        engines: impl Into<Engines>,
    ) -> Result<JsonValue> {
        self.call(priority_add_options(keyword.into(), engines.into()))
            .await
    }

    pub async fn priority_status(&self, priority_id: &str) -> Result<JsonValue> {
        self.call(priority_status_options(priority_id)).await
    }

    /// Last [`DEFAULT_CHECK_LIMIT`] check ids and timestamps for a keyword/engine pair.
    pub async fn check(&self, keyword_id: &str, engine: &str) -> Result<JsonValue> {
        self.check_with_limit(keyword_id, engine, DEFAULT_CHECK_LIMIT)
            .await
    }

    pub async fn check_with_limit(
        &self,
        keyword_id: &str,
        engine: &str,
        limit: u32,
    ) -> Result<JsonValue> {
        self.call(check_options(keyword_id, engine, limit)).await
    }

    /// SERP data for a check, optionally restricted to `domain`.
    pub async fn serp(&self, check_id: &str, domain: Option<&str>) -> Result<JsonValue> {
        self.call(serp_options(check_id, domain)).await
    }

    /// Current credit balance.
    pub async fn credit(&self) -> Result<JsonValue> {
        self.call(credit_options()).await
    }

    /// Daily flux trend for an engine code.
    pub async fn flux(&self, engine_code: &str) -> Result<JsonValue> {
        self.flux_with_type(engine_code, DEFAULT_FLUX_TYPE).await
    }

    pub async fn flux_with_type(&self, engine_code: &str, kind: &str) -> Result<JsonValue> {
        self.call(flux_options(engine_code, kind)).await
    }
}
