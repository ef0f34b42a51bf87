use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("kannapedia_scraper/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// GET one strain report page and return its markup.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    info!("Fetching strain page: {}", url);
    let html = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Strain page {} returned an error status", url))?
        .text()
        .await
        .context("Failed to read strain page body")?;
    debug!("Fetched {} bytes", html.len());
    Ok(html)
}
