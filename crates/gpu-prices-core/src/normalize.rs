//! Scrape payload → [`GpuListing`]s, with the fallback catalog behind every
//! path that can't produce rows.

use serde::Deserialize;
use serde_json::Value;

use crate::error::NormalizeError;
use crate::extract::{self, MODEL_FIELD, PRICE_FIELD, VRAM_FIELD};
use crate::fallback::fallback_listings;
use crate::listing::{now_timestamp, GpuListing};
use crate::payload::classify;
use crate::provider::{determine_region, display_name};

pub const DEFAULT_VRAM_GB: u32 = 24;
pub const DEFAULT_PRICE_PER_HOUR: f64 = 0.5;
pub const MIN_MODEL_LEN: usize = 2;
pub const MIN_RECORDS: usize = 1;

/// Defaults and thresholds applied during extraction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NormalizePolicy {
    pub default_vram_gb: u32,
    pub default_price_per_hour: f64,
    pub min_model_len: usize,
    /// Fewer candidate rows than this and the fallback catalog is served.
    pub min_records: usize,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        Self {
            default_vram_gb: DEFAULT_VRAM_GB,
            default_price_per_hour: DEFAULT_PRICE_PER_HOUR,
            min_model_len: MIN_MODEL_LEN,
            min_records: MIN_RECORDS,
        }
    }
}

impl NormalizePolicy {
    /// Replace out-of-range values so defaults can't break listing invariants.
    pub fn sanitized(mut self) -> Self {
        if self.default_vram_gb == 0 {
            self.default_vram_gb = DEFAULT_VRAM_GB;
        }
        if !(self.default_price_per_hour > 0.0 && self.default_price_per_hour.is_finite()) {
            self.default_price_per_hour = DEFAULT_PRICE_PER_HOUR;
        }
        self.min_records = self.min_records.max(1);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    policy: NormalizePolicy,
}

impl Normalizer {
    pub fn with_policy(policy: NormalizePolicy) -> Self {
        Self {
            policy: policy.sanitized(),
        }
    }

    pub fn policy(&self) -> &NormalizePolicy {
        &self.policy
    }

    /// Always returns at least one listing: anything that can't be
    /// extracted is replaced by the provider's fallback catalog.
    pub fn normalize(&self, raw: Option<&Value>, provider_key: &str) -> Vec<GpuListing> {
        match self.try_normalize(raw, provider_key) {
            Ok(listings) => listings,
            Err(e) => {
                tracing::warn!(provider = provider_key, reason = %e, "using fallback data");
                fallback_listings(provider_key)
            }
        }
    }

    /// Like [`normalize`](Self::normalize) but reports why no rows came out
    /// instead of falling back.
    pub fn try_normalize(
        &self,
        raw: Option<&Value>,
        provider_key: &str,
    ) -> Result<Vec<GpuListing>, NormalizeError> {
        let shape = classify(raw);
        if let Some(reject) = shape.rejection() {
            return Err(reject);
        }

        let candidates = shape.candidates();
        tracing::info!(
            provider = provider_key,
            shape = shape.label(),
            count = candidates.len(),
            "extracted candidate rows"
        );
        if candidates.len() < self.policy.min_records {
            return Err(NormalizeError::TooFewRecords {
                found: candidates.len(),
                required: self.policy.min_records,
            });
        }

        let provider = display_name(provider_key);
        let region = determine_region(provider_key);
        let timestamp = now_timestamp();

        Ok(candidates
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let listing = GpuListing {
                    provider: provider.clone(),
                    gpu_model: self.model(row, i),
                    vram_gb: self.vram_gb(row),
                    price_per_hour: self.price(row),
                    region: region.to_string(),
                    scrape_timestamp: timestamp.clone(),
                };
                tracing::debug!(
                    model = %listing.gpu_model,
                    vram_gb = listing.vram_gb,
                    price = listing.price_per_hour,
                    per_gb = listing.price_per_gb_vram(),
                    "extracted listing"
                );
                listing
            })
            .collect())
    }

    fn model(&self, row: &Value, index: usize) -> String {
        let text = extract::field_text(row, MODEL_FIELD);
        extract::extract_model(&text, index, self.policy.min_model_len)
    }

    fn vram_gb(&self, row: &Value) -> u32 {
        match extract::extract_vram_gb(&extract::field_text(row, VRAM_FIELD)) {
            0 => self.policy.default_vram_gb,
            v => v,
        }
    }

    fn price(&self, row: &Value) -> f64 {
        let p = extract::extract_price(&extract::field_text(row, PRICE_FIELD));
        if p > 0.0 && p.is_finite() {
            p
        } else {
            self.policy.default_price_per_hour
        }
    }
}

/// [`Normalizer::normalize`] with the default policy.
pub fn normalize(raw: Option<&Value>, provider_key: &str) -> Vec<GpuListing> {
    Normalizer::default().normalize(raw, provider_key)
}
