use std::fs;

use serde::Deserialize;
use serpmetrics::{ClientOptions, Credentials, SerpMetricsClient, SerpMetricsError};

#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(rename = "SERPMETRICS_KEY")]
    serpmetrics_key: Option<String>,
    #[serde(rename = "SERPMETRICS_SECRET")]
    serpmetrics_secret: Option<String>,
    #[serde(rename = "SERPMETRICS_API_URL")]
    serpmetrics_api_url: Option<String>,
}

fn load_live_client() -> Result<SerpMetricsClient, String> {
    if let Ok(client) = SerpMetricsClient::from_env() {
        return Ok(client);
    }

    let content = fs::read_to_string("secrets.json").map_err(|_| {
        "SERPMETRICS_KEY/SERPMETRICS_SECRET env or secrets.json is required".to_owned()
    })?;
    let parsed: SecretsFile = serde_json::from_str(&content)
        .map_err(|err| format!("secrets.json could not be parsed: {err}"))?;

    let key = parsed
        .serpmetrics_key
        .ok_or_else(|| "missing SERPMETRICS_KEY in secrets.json".to_owned())?;
    let secret = parsed
        .serpmetrics_secret
        .ok_or_else(|| "missing SERPMETRICS_SECRET in secrets.json".to_owned())?;

    let mut options = ClientOptions::default();
    if let Some(api_url) = parsed.serpmetrics_api_url {
        options.api_url = api_url;
    }
    Ok(SerpMetricsClient::new(Credentials::new(key, secret)).with_options(options))
}

#[tokio::test]
async fn live_credit_and_flux() {
    let client = match load_live_client() {
        Ok(client) => client,
        Err(_) => {
            eprintln!("skipping live test: credentials not found in env or secrets.json");
            return;
        }
    };

    let credit = client.credit().await.expect("credit must succeed");
    assert!(credit.is_object());
    assert_eq!(client.last_http_status(), Some(200));

    match client.flux("google_en-us").await {
        Ok(flux) => assert!(!flux.is_null()),
        Err(SerpMetricsError::Http { status, .. }) => {
            assert_eq!(client.last_http_status(), Some(status));
        }
        Err(err) => panic!("flux failed: {err}"),
    }
}
