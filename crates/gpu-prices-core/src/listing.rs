use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One GPU offering from one provider.
///
/// Price per GB of VRAM is always derived from `price_per_hour / vram_gb`
/// and is never stored, so it cannot drift from the other two fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ListingJson", from = "ListingJson")]
pub struct GpuListing {
    /// Display name, e.g. "Digital Ocean".
    pub provider: String,
    pub gpu_model: String,
    pub vram_gb: u32,
    /// USD per hour.
    pub price_per_hour: f64,
    pub region: String,
    /// ISO-8601, set when the listing was normalized.
    pub scrape_timestamp: String,
}

impl GpuListing {
    pub fn price_per_gb_vram(&self) -> f64 {
        self.price_per_hour / self.vram_gb as f64
    }
}

/// Current time in the format used for `scrape_timestamp`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wire shape shared with the browser front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListingJson {
    provider: String,
    #[serde(rename = "gpuModel")]
    gpu_model: String,
    #[serde(rename = "vramGB")]
    vram_gb: u32,
    #[serde(rename = "pricePerHour")]
    price_per_hour: f64,
    #[serde(rename = "pricePerGBVram", default)]
    price_per_gb_vram: f64,
    region: String,
    #[serde(rename = "scrapeTimestamp")]
    scrape_timestamp: String,
}

impl From<GpuListing> for ListingJson {
    fn from(l: GpuListing) -> Self {
        let price_per_gb_vram = l.price_per_gb_vram();
        Self {
            provider: l.provider,
            gpu_model: l.gpu_model,
            vram_gb: l.vram_gb,
            price_per_hour: l.price_per_hour,
            price_per_gb_vram,
            region: l.region,
            scrape_timestamp: l.scrape_timestamp,
        }
    }
}

impl From<ListingJson> for GpuListing {
    // The incoming ratio is dropped; it is recomputed on demand.
    fn from(j: ListingJson) -> Self {
        Self {
            provider: j.provider,
            gpu_model: j.gpu_model,
            vram_gb: j.vram_gb,
            price_per_hour: j.price_per_hour,
            region: j.region,
            scrape_timestamp: j.scrape_timestamp,
        }
    }
}

/// Row layout of the `gpu_provider_data` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRow {
    pub provider: String,
    pub gpu_model: String,
    pub vram_gb: u32,
    pub price_per_hour: f64,
    pub price_per_gb_vram: f64,
    pub region: String,
    pub scrape_timestamp: String,
}

impl From<&GpuListing> for ListingRow {
    fn from(l: &GpuListing) -> Self {
        Self {
            provider: l.provider.clone(),
            gpu_model: l.gpu_model.clone(),
            vram_gb: l.vram_gb,
            price_per_hour: l.price_per_hour,
            price_per_gb_vram: l.price_per_gb_vram(),
            region: l.region.clone(),
            scrape_timestamp: l.scrape_timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn a100() -> GpuListing {
        GpuListing {
            provider: "Digital Ocean".into(),
            gpu_model: "A100".into(),
            vram_gb: 80,
            price_per_hour: 2.5,
            region: "US East".into(),
            scrape_timestamp: "2025-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn json_uses_front_end_field_names() {
        let v = serde_json::to_value(a100()).unwrap();
        assert_eq!(v["gpuModel"], "A100");
        assert_eq!(v["vramGB"], 80);
        assert_eq!(v["pricePerHour"], 2.5);
        assert_eq!(v["pricePerGBVram"], 0.03125);
        assert_eq!(v["scrapeTimestamp"], "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn stale_ratio_is_ignored_on_read() {
        let v = json!({
            "provider": "Vast",
            "gpuModel": "RTX 4090",
            "vramGB": 24,
            "pricePerHour": 0.48,
            "pricePerGBVram": 99.0,
            "region": "Europe",
            "scrapeTimestamp": "2025-01-01T00:00:00.000Z"
        });
        let l: GpuListing = serde_json::from_value(v).unwrap();
        assert_eq!(l.price_per_gb_vram(), 0.48 / 24.0);
    }

    #[test]
    fn row_carries_derived_ratio() {
        let row = ListingRow::from(&a100());
        assert_eq!(row.gpu_model, "A100");
        assert_eq!(row.price_per_gb_vram, 2.5 / 80.0);
    }

    #[test]
    fn timestamp_is_utc_millis() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'), "{ts}");
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
