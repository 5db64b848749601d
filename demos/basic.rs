use serpmetrics::SerpMetricsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = SerpMetricsClient::from_env()?;

    let credit = client.credit().await?;
    println!("credit: {credit}");

    let added = client
        .add("running shoes", ["google_en-us", "bing_en-us"])
        .await?;
    println!("added: {added}");

    let flux = client.flux("google_en-us").await?;
    println!("flux: {flux}");

    println!("last http status: {:?}", client.last_http_status());
    Ok(())
}
