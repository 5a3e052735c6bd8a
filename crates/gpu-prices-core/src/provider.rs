use serde::Serialize;

/// CSS selectors handed to the scraping service for each listing field.
#[derive(Debug, Clone, Serialize)]
pub struct Selectors {
    #[serde(rename = "gpuModel")]
    pub gpu_model: &'static str,
    #[serde(rename = "vramSize")]
    pub vram_size: &'static str,
    #[serde(rename = "pricePerHour")]
    pub price_per_hour: &'static str,
}

/// Static provider registry entry.
#[derive(Debug, Clone)]
pub struct Provider {
    /// camelCase key, e.g. `digitalOcean`. Lookups ignore case.
    pub key: &'static str,
    pub display_name: &'static str,
    pub region: &'static str,
    /// Public pricing page.
    pub url: &'static str,
    pub selectors: Selectors,
    pub wait_for_selector: &'static str,
}

pub const PROVIDERS: &[Provider] = &[
    Provider {
        key: "digitalOcean",
        display_name: "Digital Ocean",
        region: "US East",
        url: "https://www.digitalocean.com/products/gpu-droplets",
        selectors: Selectors {
            gpu_model: ".gpu-card .title, .gpu-pricing-card .card-title, table td:first-child, .pricing-table tr td:nth-child(1)",
            vram_size: ".specs-list .specs-value:contains(\"VRAM\"), .specs-desc:contains(\"GB\"), .pricing-table tr td:nth-child(2)",
            price_per_hour: ".price-box .price, .gpu-pricing-card .price-value, .price, .pricing-table tr td:nth-child(4)",
        },
        wait_for_selector: ".gpu-card, .gpu-pricing-card, .specs-list, table, .pricing-table",
    },
    Provider {
        key: "runpod",
        display_name: "Runpod",
        region: "US West",
        url: "https://www.runpod.io/pricing",
        selectors: Selectors {
            gpu_model: "tr td:first-child, .gpu-name, .gpu-model, .pricing-table tr td:nth-child(1)",
            vram_size: "tr td:nth-child(2), .gpu-memory, .memory-size, .pricing-table tr td:nth-child(2)",
            price_per_hour: "tr td:nth-child(4), .price-per-hour, .price, .pricing-table tr td:nth-child(3)",
        },
        wait_for_selector: "table, tr, .gpu-name, .gpu-model, .pricing-table",
    },
    Provider {
        key: "vast",
        display_name: "Vast",
        region: "Europe",
        url: "https://vast.ai/pricing",
        selectors: Selectors {
            gpu_model: ".pricing-table tr td:first-child, .pricing__body td:nth-child(1), td strong, .gpu-model",
            vram_size: ".pricing-table tr td:nth-child(2), .pricing__body td:nth-child(2), td:contains(\"GB\"), .memory-size",
            price_per_hour: ".pricing-table tr td:nth-child(3), .pricing__body td:nth-child(4), td:contains(\"$\"), .price",
        },
        wait_for_selector: "table, .pricing-table, .pricing__body, tr, .pricing-card",
    },
    Provider {
        key: "valdi",
        display_name: "Valdi",
        region: "US North",
        url: "https://www.valdi.ai/compute",
        selectors: Selectors {
            gpu_model: ".pricing-cards .card-title, .gpu-model-name, tr td:first-child, td:contains(\"GPU\")",
            vram_size: ".pricing-cards .memory-size, .vram-info, tr td:contains(\"GB\"), td:contains(\"Memory\")",
            price_per_hour: ".pricing-cards .price-tag, .hourly-rate, tr td:contains(\"$\"), td:contains(\"/hr\")",
        },
        wait_for_selector: ".pricing-cards, .gpu-model-name, table, tr, .pricing-table",
    },
    Provider {
        key: "coreweave",
        display_name: "Coreweave",
        region: "US Central",
        url: "https://www.coreweave.com/pricing",
        selectors: Selectors {
            gpu_model: "tbody tr td:first-child, .gpu-model, .card-title:contains(\"GPU\"), table td:contains(\"NVIDIA\")",
            vram_size: "tbody tr td:nth-child(2), .memory, table td:contains(\"GB\"), .specs-item:contains(\"Memory\")",
            price_per_hour: "tbody tr td:nth-child(4), .price, table td:contains(\"$\"), .pricing-value",
        },
        wait_for_selector: "tbody, tr, td, .gpu-model, table, .pricing-table",
    },
    Provider {
        key: "nebius",
        display_name: "Nebius",
        region: "US East",
        url: "https://nebius.com/prices",
        selectors: Selectors {
            gpu_model: ".price-table tr td:first-child, .gpu-specs td:contains(\"Model\"), .model-name, .gpu-table td:nth-child(1)",
            vram_size: ".price-table tr td:nth-child(2), .gpu-specs td:contains(\"Memory\"), .vram-spec, .gpu-table td:nth-child(2)",
            price_per_hour: ".price-table tr td:nth-child(4), .price-info, .hourly-rate, .gpu-table td:nth-child(4)",
        },
        wait_for_selector: ".price-table, .gpu-specs, table, tr, .gpu-table",
    },
    Provider {
        key: "tencentCloud",
        display_name: "Tencent Cloud",
        region: "Asia Pacific",
        url: "https://www.tencentcloud.com/products/gpu",
        selectors: Selectors {
            gpu_model: ".pricing-table tr td:first-child, .gpu-instance-type, td:contains(\"GPU\"), td:contains(\"NVIDIA\")",
            vram_size: ".pricing-table tr td:nth-child(3), .instance-specs, td:contains(\"GB\"), td:contains(\"Memory\")",
            price_per_hour: ".pricing-table tr td:nth-child(4), .price-column, td:contains(\"$\"), td:contains(\"/Hour\")",
        },
        wait_for_selector: ".pricing-table, .gpu-instance-type, table, tr, .product-table",
    },
    Provider {
        key: "databaseMart",
        display_name: "Database Mart",
        region: "US East",
        url: "https://www.databasemart.com/gpu-server",
        selectors: Selectors {
            gpu_model: ".pricing-table tr td:first-child, .gpu-model-name, .model-name, table td:contains(\"GPU\")",
            vram_size: ".pricing-table tr td:contains(\"GB\"), .memory-size, .vram-info, td:contains(\"Memory\")",
            price_per_hour: ".pricing-table tr td:contains(\"$\"), .price-tag, .hourly-rate, td:contains(\"/hr\")",
        },
        wait_for_selector: ".pricing-table, table, .gpu-specs, .pricing-section",
    },
];

/// Regions handed out to providers missing from the registry.
pub const FALLBACK_REGIONS: &[&str] = &["US East", "US West", "Europe", "Asia Pacific"];

/// Case-insensitive registry lookup.
pub fn find_provider(key: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}

/// Human-readable name for a provider key: a space before every
/// non-leading capital, first letter upper-cased.
/// `digitalOcean` becomes `Digital Ocean`, `runpod` becomes `Runpod`.
pub fn display_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
            continue;
        }
        if c.is_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Region for a provider key. Unknown keys get a stable pick from
/// [`FALLBACK_REGIONS`] derived from the lower-cased key.
pub fn determine_region(key: &str) -> &'static str {
    if let Some(p) = find_provider(key) {
        return p.region;
    }
    let idx = (fnv1a(&key.to_lowercase()) % FALLBACK_REGIONS.len() as u64) as usize;
    FALLBACK_REGIONS[idx]
}

/// Pricing page for a provider display name, as stored on listings.
pub fn provider_url(display: &str) -> Option<&'static str> {
    PROVIDERS
        .iter()
        .find(|p| p.display_name.eq_ignore_ascii_case(display) || p.key.eq_ignore_ascii_case(display))
        .map(|p| p.url)
}

/// Registered provider whose pricing page lives on the same host as `url`.
pub fn provider_for_url(url: &str) -> Option<&'static Provider> {
    let host = url_host(url)?;
    PROVIDERS
        .iter()
        .find(|p| url_host(p.url).is_some_and(|h| h.eq_ignore_ascii_case(host)))
}

/// Host without scheme, port or a leading `www.`.
fn url_host(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map_or(url, |(_, r)| r);
    let host = rest.split(['/', '?', '#', ':']).next()?;
    let host = match host.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &host[4..],
        _ => host,
    };
    (!host.is_empty()).then_some(host)
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| {
        (h ^ b as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_page_url() {
        let p = provider_for_url("https://www.runpod.io/gpu-instance/pricing?tab=secure").unwrap();
        assert_eq!(p.key, "runpod");
        assert_eq!(provider_for_url("vast.ai/pricing").unwrap().key, "vast");
        assert_eq!(provider_for_url("https://WWW.Nebius.com:443/").unwrap().key, "nebius");
        assert!(provider_for_url("https://lambdalabs.com/service/gpu-cloud").is_none());
        assert!(provider_for_url("").is_none());
    }

    #[test]
    fn display_name_splits_camel_case() {
        assert_eq!(display_name("digitalOcean"), "Digital Ocean");
        assert_eq!(display_name("tencentCloud"), "Tencent Cloud");
        assert_eq!(display_name("runpod"), "Runpod");
        assert_eq!(display_name("DigitalOcean"), "Digital Ocean");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn registry_display_names_match_formatter() {
        for p in PROVIDERS {
            assert_eq!(display_name(p.key), p.display_name, "{}", p.key);
        }
    }

    #[test]
    fn known_regions() {
        assert_eq!(determine_region("runpod"), "US West");
        assert_eq!(determine_region("DIGITALOCEAN"), "US East");
        assert_eq!(determine_region("vast"), "Europe");
        assert_eq!(determine_region("valdi"), "US North");
        assert_eq!(determine_region("coreweave"), "US Central");
        assert_eq!(determine_region("tencentcloud"), "Asia Pacific");
        assert_eq!(determine_region("databasemart"), "US East");
    }

    #[test]
    fn unknown_region_is_stable() {
        let first = determine_region("lambdaLabs");
        for _ in 0..10 {
            assert_eq!(determine_region("lambdaLabs"), first);
        }
        assert_eq!(determine_region("LAMBDALABS"), first);
        assert!(FALLBACK_REGIONS.contains(&first));
    }

    #[test]
    fn registry_entries_are_complete() {
        for p in PROVIDERS {
            assert!(p.url.starts_with("https://"), "{}: bad url", p.key);
            assert!(!p.selectors.gpu_model.is_empty(), "{}: no model selector", p.key);
            assert!(!p.selectors.vram_size.is_empty(), "{}: no vram selector", p.key);
            assert!(!p.selectors.price_per_hour.is_empty(), "{}: no price selector", p.key);
        }
    }

    #[test]
    fn url_by_display_name() {
        assert_eq!(provider_url("Digital Ocean"), Some("https://www.digitalocean.com/products/gpu-droplets"));
        assert_eq!(provider_url("runpod"), Some("https://www.runpod.io/pricing"));
        assert_eq!(provider_url("Lambda"), None);
    }
}
