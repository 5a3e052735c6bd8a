use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::FirecrawlSettings;
use crate::error::{GpuError, Result};
use crate::provider::Provider;

/// Fetches a provider's pricing page. `Ok(None)` means "nothing scraped";
/// the normalizer turns that into fallback data.
pub trait Scraper {
    fn scrape(&self, provider: &Provider) -> impl Future<Output = Result<Option<Value>>> + Send;
}

/// Never touches the network; every provider gets its fallback catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineScraper;

impl Scraper for OfflineScraper {
    async fn scrape(&self, provider: &Provider) -> Result<Option<Value>> {
        tracing::debug!(provider = provider.key, "offline, skipping scrape");
        Ok(None)
    }
}

pub struct FirecrawlClient {
    http: Client,
    api_url: String,
    api_key: String,
    wait_for_ms: u64,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    success: bool,
    data: Option<Value>,
    error: Option<String>,
    warning: Option<String>,
}

impl FirecrawlClient {
    pub fn new(settings: &FirecrawlSettings) -> Result<Self> {
        let api_key = settings.resolve_api_key().ok_or(GpuError::NoApiKey)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key,
            wait_for_ms: settings.wait_for_ms,
        })
    }

    /// Scrape one URL and return the service's `data` object untouched.
    pub async fn scrape_url(&self, url: &str, wait_for_selector: Option<&str>) -> Result<Option<Value>> {
        let mut body = json!({
            "url": url,
            "formats": ["html"],
            "waitFor": self.wait_for_ms,
        });
        if let Some(sel) = wait_for_selector {
            body["waitForSelector"] = Value::from(sel);
        }

        let resp = self
            .http
            .post(format!("{}/v1/scrape", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GpuError::Api { status, body });
        }

        let parsed: ScrapeResponse = resp.json().await?;
        if !parsed.success {
            return Err(GpuError::Api {
                status,
                body: parsed.error.unwrap_or_else(|| "scrape reported failure".into()),
            });
        }
        if let Some(w) = parsed.warning {
            tracing::warn!(url, warning = %w, "scrape warning");
        }
        Ok(parsed.data)
    }
}

impl Scraper for FirecrawlClient {
    async fn scrape(&self, provider: &Provider) -> Result<Option<Value>> {
        tracing::info!(provider = provider.key, url = provider.url, "scraping");
        self.scrape_url(provider.url, Some(provider.wait_for_selector))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::find_provider;

    #[test]
    fn client_requires_api_key() {
        if std::env::var("FIRECRAWL_API_KEY").is_ok() {
            return;
        }
        let settings = FirecrawlSettings::default();
        assert!(matches!(FirecrawlClient::new(&settings), Err(GpuError::NoApiKey)));
    }

    #[test]
    fn client_trims_api_url() {
        let settings = FirecrawlSettings {
            api_url: "https://scrape.example.com/".into(),
            api_key: Some("fc-test".into()),
            ..Default::default()
        };
        let client = FirecrawlClient::new(&settings).unwrap();
        assert_eq!(client.api_url, "https://scrape.example.com");
    }

    #[tokio::test]
    async fn offline_scraper_returns_nothing() {
        let p = find_provider("vast").unwrap();
        assert!(OfflineScraper.scrape(p).await.unwrap().is_none());
    }

    /// Hits the real service. Run with: cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn firecrawl_scrapes_runpod() {
        let client = FirecrawlClient::new(&FirecrawlSettings::default()).expect("api key");
        let p = find_provider("runpod").unwrap();
        let data = client.scrape(p).await.expect("scrape should succeed");
        assert!(data.is_some());
    }
}
