use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::config::UpdateSettings;
use crate::error::{GpuError, Result};
use crate::normalize::Normalizer;
use crate::provider::{find_provider, PROVIDERS};
use crate::scrape::Scraper;
use crate::store::ListingStore;

#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    /// Update every registered provider when none is stale.
    pub force: bool,
    /// Explicit provider keys; overrides staleness checks.
    pub providers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProviderOutcome {
    Updated { count: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    pub results: BTreeMap<String, ProviderOutcome>,
    pub updated: usize,
}

/// Which providers an update run should touch, as registry keys without
/// duplicates. Explicit keys that aren't registered are kept so the run can
/// report them; stale log entries that aren't registered are skipped.
pub fn select_providers(
    store: &impl ListingStore,
    request: &UpdateRequest,
    settings: &UpdateSettings,
) -> Result<Vec<String>> {
    if !request.providers.is_empty() {
        return Ok(canonical_keys(request.providers.iter().map(String::as_str)));
    }
    let stale = store.stale_providers(Utc::now() - settings.stale_after())?;
    let stale: Vec<&str> = stale
        .iter()
        .map(String::as_str)
        .filter(|k| {
            let known = find_provider(k).is_some();
            if !known {
                tracing::debug!(provider = *k, "skipping unregistered stale provider");
            }
            known
        })
        .collect();
    if !stale.is_empty() {
        return Ok(canonical_keys(stale));
    }
    if request.force {
        return Ok(PROVIDERS.iter().map(|p| p.key.to_string()).collect());
    }
    Ok(Vec::new())
}

/// Registry spelling for known keys, first-seen order, case-insensitive dedup.
fn canonical_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for k in keys {
        let key = find_provider(k).map_or(k, |p| p.key);
        if !out.iter().any(|o| o.eq_ignore_ascii_case(key)) {
            out.push(key.to_string());
        }
    }
    out
}

/// Scrape, normalize and store each selected provider in turn. A failing
/// provider is recorded in the report and the run moves on.
pub async fn run_update<S: Scraper>(
    scraper: &S,
    store: &mut impl ListingStore,
    normalizer: &Normalizer,
    request: &UpdateRequest,
    settings: &UpdateSettings,
) -> Result<UpdateReport> {
    let keys = select_providers(store, request, settings)?;
    let mut report = UpdateReport::default();
    if keys.is_empty() {
        tracing::info!("no providers need updating");
        return Ok(report);
    }
    tracing::info!(count = keys.len(), providers = %keys.join(", "), "updating providers");

    for (i, key) in keys.iter().enumerate() {
        if i > 0 && !settings.delay().is_zero() {
            tokio::time::sleep(settings.delay()).await;
        }
        let outcome = match update_one(scraper, store, normalizer, key).await {
            Ok(count) => {
                report.updated += 1;
                ProviderOutcome::Updated { count }
            }
            Err(e) => {
                tracing::error!(provider = %key, error = %e, "update failed");
                ProviderOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        report.results.insert(key.clone(), outcome);
    }
    Ok(report)
}

/// Wipe the store, then repopulate every registered provider. Rows and log
/// entries under keys that left the registry are gone afterwards.
pub async fn run_reset<S: Scraper>(
    scraper: &S,
    store: &mut impl ListingStore,
    normalizer: &Normalizer,
    settings: &UpdateSettings,
) -> Result<UpdateReport> {
    store.clear()?;
    tracing::info!("cleared stored listings and scrape log");
    let request = UpdateRequest {
        force: true,
        providers: PROVIDERS.iter().map(|p| p.key.to_string()).collect(),
    };
    run_update(scraper, store, normalizer, &request, settings).await
}

async fn update_one<S: Scraper>(
    scraper: &S,
    store: &mut impl ListingStore,
    normalizer: &Normalizer,
    key: &str,
) -> Result<usize> {
    let provider = find_provider(key).ok_or_else(|| GpuError::UnknownProvider(key.to_string()))?;

    // Scrape errors degrade to fallback data rather than failing the provider.
    let payload = match scraper.scrape(provider).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(provider = key, error = %e, "scrape failed, using fallback data");
            None
        }
    };

    let listings = normalizer.normalize(payload.as_ref(), provider.key);
    store.replace_provider(provider.key, &listings)?;
    store.mark_scraped(provider.key, Utc::now())?;
    tracing::info!(provider = key, count = listings.len(), "stored listings");
    Ok(listings.len())
}
