use serde::Serialize;

use crate::listing::GpuListing;
use crate::provider::provider_url;

/// Best prices a single provider offers across its listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    pub provider: String,
    pub best_price: f64,
    #[serde(rename = "bestPricePerGB")]
    pub best_price_per_gb: f64,
    pub gpu_count: usize,
    pub website_url: Option<&'static str>,
}

/// One entry per provider, best value (price per GB) first.
pub fn provider_stats(listings: &[GpuListing]) -> Vec<ProviderStats> {
    let mut stats: Vec<ProviderStats> = Vec::new();
    for l in listings {
        match stats.iter_mut().find(|s| s.provider == l.provider) {
            Some(s) => {
                s.best_price = s.best_price.min(l.price_per_hour);
                s.best_price_per_gb = s.best_price_per_gb.min(l.price_per_gb_vram());
                s.gpu_count += 1;
            }
            None => stats.push(ProviderStats {
                provider: l.provider.clone(),
                best_price: l.price_per_hour,
                best_price_per_gb: l.price_per_gb_vram(),
                gpu_count: 1,
                website_url: provider_url(&l.provider),
            }),
        }
    }
    stats.sort_by(|a, b| {
        a.best_price_per_gb
            .partial_cmp(&b.best_price_per_gb)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats
}

/// Cheapest listing whose model name contains `model`.
pub fn cheapest_for_model<'a>(listings: &'a [GpuListing], model: &str) -> Option<&'a GpuListing> {
    listings
        .iter()
        .filter(|l| l.gpu_model.contains(model))
        .min_by(|a, b| {
            a.price_per_hour
                .partial_cmp(&b.price_per_hour)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_listings;

    #[test]
    fn stats_per_provider() {
        let mut all = fallback_listings("vast");
        all.extend(fallback_listings("digitalOcean"));
        let stats = provider_stats(&all);

        assert_eq!(stats.len(), 2);
        let vast = stats.iter().find(|s| s.provider == "Vast").unwrap();
        assert_eq!(vast.gpu_count, 9);
        assert_eq!(vast.best_price, 0.29);
        assert_eq!(vast.website_url, Some("https://vast.ai/pricing"));

        let digital = stats.iter().find(|s| s.provider == "Digital Ocean").unwrap();
        assert_eq!(digital.gpu_count, 8);
        assert_eq!(digital.best_price, 0.99);
    }

    #[test]
    fn stats_sorted_by_best_value() {
        let mut all = fallback_listings("digitalOcean");
        all.extend(fallback_listings("vast"));
        let stats = provider_stats(&all);
        assert!(stats
            .windows(2)
            .all(|w| w[0].best_price_per_gb <= w[1].best_price_per_gb));
        assert_eq!(stats[0].provider, "Vast");
    }

    #[test]
    fn cheapest_model_lookup() {
        let mut all = fallback_listings("runpod");
        all.extend(fallback_listings("vast"));
        let h = cheapest_for_model(&all, "A100").unwrap();
        assert_eq!(h.provider, "Vast");
        assert_eq!(h.price_per_hour, 0.89);
        assert!(cheapest_for_model(&all, "MI300X").is_none());
    }

    #[test]
    fn empty_input() {
        assert!(provider_stats(&[]).is_empty());
    }
}
