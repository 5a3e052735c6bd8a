use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::listing::GpuListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Price,
    PricePerGb,
    Vram,
}

impl FromStr for SortKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "price-per-gb" | "per-gb" | "value" => Ok(Self::PricePerGb),
            "vram" => Ok(Self::Vram),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Table filter settings as the front end keeps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Inclusive.
    pub vram_range: (u32, u32),
    /// Inclusive, USD per hour.
    pub price_range: (f64, f64),
    pub search_term: String,
    /// Display names; empty means all.
    pub selected_providers: Vec<String>,
    pub sort_by: SortKey,
    pub sort_direction: SortDirection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            vram_range: (0, 80),
            price_range: (0.0, 5.0),
            search_term: String::new(),
            selected_providers: Vec::new(),
            sort_by: SortKey::Vram,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl FilterState {
    pub fn matches(&self, l: &GpuListing) -> bool {
        let (vmin, vmax) = self.vram_range;
        let (pmin, pmax) = self.price_range;
        if l.vram_gb < vmin || l.vram_gb > vmax {
            return false;
        }
        if l.price_per_hour < pmin || l.price_per_hour > pmax {
            return false;
        }
        if !self.selected_providers.is_empty()
            && !self
                .selected_providers
                .iter()
                .any(|p| p.eq_ignore_ascii_case(&l.provider))
        {
            return false;
        }
        if !self.search_term.is_empty() {
            let needle = self.search_term.to_lowercase();
            return [&l.provider, &l.gpu_model, &l.region]
                .iter()
                .any(|s| s.to_lowercase().contains(&needle));
        }
        true
    }
}

/// Filter then sort. VRAM-descending groups rows by VRAM size and orders
/// each group by hourly price, cheapest first.
pub fn apply_filters(listings: &[GpuListing], filters: &FilterState) -> Vec<GpuListing> {
    let mut out: Vec<GpuListing> = listings
        .iter()
        .filter(|l| filters.matches(l))
        .cloned()
        .collect();

    match (filters.sort_by, filters.sort_direction) {
        (SortKey::Vram, SortDirection::Desc) => out.sort_by(|a, b| {
            b.vram_gb
                .cmp(&a.vram_gb)
                .then_with(|| cmp_f64(a.price_per_hour, b.price_per_hour))
        }),
        (key, dir) => out.sort_by(|a, b| {
            let ord = cmp_f64(sort_value(a, key), sort_value(b, key));
            match dir {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }),
    }
    out
}

fn sort_value(l: &GpuListing, key: SortKey) -> f64 {
    match key {
        SortKey::Price => l.price_per_hour,
        SortKey::PricePerGb => l.price_per_gb_vram(),
        SortKey::Vram => l.vram_gb as f64,
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
