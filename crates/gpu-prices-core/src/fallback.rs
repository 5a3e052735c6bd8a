//! Representative catalog served when a scrape yields nothing usable.

use crate::listing::{now_timestamp, GpuListing};
use crate::provider::{determine_region, display_name};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuOffer {
    pub model: &'static str,
    pub vram_gb: u32,
    pub price_per_hour: f64,
}

const fn offer(model: &'static str, vram_gb: u32, price_per_hour: f64) -> GpuOffer {
    GpuOffer { model, vram_gb, price_per_hour }
}

/// Keyed by lower-cased provider key.
pub const FALLBACK_CATALOG: &[(&str, &[GpuOffer])] = &[
    ("digitalocean", &[
        offer("RTX 4090", 24, 2.99),
        offer("A100 SXM", 80, 2.99),
        offer("A100 PCIe", 40, 1.99),
        offer("A10G", 24, 1.49),
        offer("A40", 48, 2.29),
        offer("L4", 24, 0.99),
        offer("L40S", 48, 2.59),
        offer("H100", 80, 4.99),
    ]),
    ("runpod", &[
        offer("RTX 5090", 32, 2.39),
        offer("RTX 4090", 24, 1.69),
        offer("RTX 3090", 24, 0.99),
        offer("RTX 3080", 10, 0.79),
        offer("A100 80GB", 80, 2.29),
        offer("A100 40GB", 40, 1.89),
        offer("A10G", 24, 1.19),
        offer("H100 PCIe", 80, 3.49),
        offer("RTX 6000 Ada", 48, 1.99),
    ]),
    ("vast", &[
        offer("RTX 5090", 32, 0.89),
        offer("RTX 4090", 24, 0.49),
        offer("RTX 3090", 24, 0.39),
        offer("RTX 3080", 10, 0.29),
        offer("A100 80GB", 80, 1.19),
        offer("A100 40GB", 40, 0.89),
        offer("RTX 6000 Ada", 48, 0.79),
        offer("L40", 48, 0.69),
        offer("H100", 80, 1.99),
    ]),
    ("valdi", &[
        offer("RTX 5090", 32, 1.29),
        offer("RTX 4090", 24, 0.89),
        offer("RTX 4080", 16, 0.69),
        offer("A100 80GB", 80, 2.49),
        offer("A100 40GB", 40, 1.89),
        offer("H100 PCIe", 80, 3.99),
        offer("H100 SXM", 80, 4.49),
        offer("L40", 48, 1.29),
    ]),
    ("coreweave", &[
        offer("RTX 5090", 32, 1.29),
        offer("RTX 4090", 24, 0.79),
        offer("H100 PCIe", 80, 3.29),
        offer("H100 SXM", 80, 3.99),
        offer("A100 80GB", 80, 1.99),
        offer("A100 40GB", 40, 1.59),
        offer("A40", 48, 1.29),
        offer("RTX 6000 Ada", 48, 1.59),
        offer("L40", 48, 1.19),
    ]),
    ("nebius", &[
        offer("RTX 5090", 32, 1.29),
        offer("RTX 4090", 24, 0.99),
        offer("RTX 3090", 24, 0.79),
        offer("RTX 4080", 16, 0.99),
        offer("A6000", 48, 1.89),
        offer("A100", 80, 2.19),
        offer("L4", 24, 0.69),
        offer("T4", 16, 0.49),
        offer("V100", 32, 1.29),
    ]),
    ("tencentcloud", &[
        offer("RTX 5090", 32, 2.19),
        offer("RTX 4090", 24, 1.69),
        offer("A100 80GB", 80, 2.79),
        offer("A100 40GB", 40, 1.99),
        offer("V100", 32, 1.59),
        offer("T4", 16, 0.69),
        offer("GN7", 24, 0.99),
        offer("GN6e", 16, 0.89),
        offer("GN7i", 32, 1.29),
    ]),
    ("databasemart", &[
        offer("RTX 4090", 24, 1.89),
        offer("RTX 3090", 24, 0.99),
        offer("A100 80GB", 80, 2.99),
        offer("A100 40GB", 40, 1.99),
        offer("H100 PCIe", 80, 3.99),
        offer("H100 SXM", 80, 4.49),
        offer("L40", 48, 1.79),
        offer("RTX 6000 Ada", 48, 1.99),
        offer("A40", 48, 1.69),
    ]),
];

/// Used for any provider key missing from [`FALLBACK_CATALOG`].
pub const DEFAULT_CATALOG: &[GpuOffer] = &[
    offer("RTX 5090", 32, 2.49),
    offer("RTX 4090", 24, 1.99),
    offer("RTX 3090", 24, 1.49),
    offer("RTX 3080", 10, 0.99),
    offer("A100 80GB", 80, 2.99),
    offer("A100 40GB", 40, 1.99),
    offer("H100", 80, 3.99),
    offer("L40", 48, 1.79),
];

pub fn catalog_for(provider_key: &str) -> &'static [GpuOffer] {
    let key = provider_key.to_lowercase();
    FALLBACK_CATALOG
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, offers)| *offers)
        .unwrap_or(DEFAULT_CATALOG)
}

/// The catalog for `provider_key` as listings sharing one timestamp.
pub fn fallback_listings(provider_key: &str) -> Vec<GpuListing> {
    let offers = catalog_for(provider_key);
    let provider = display_name(provider_key);
    let region = determine_region(provider_key);
    let timestamp = now_timestamp();

    tracing::info!(provider = provider_key, count = offers.len(), "serving fallback catalog");

    offers
        .iter()
        .map(|o| GpuListing {
            provider: provider.clone(),
            gpu_model: o.model.to_string(),
            vram_gb: o.vram_gb,
            price_per_hour: o.price_per_hour,
            region: region.to_string(),
            scrape_timestamp: timestamp.clone(),
        })
        .collect()
}
