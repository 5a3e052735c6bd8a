//! Turn free-text assistant answers into table filters and price notes.

use crate::filter::{FilterState, SortDirection, SortKey};
use crate::listing::GpuListing;
use crate::stats::cheapest_for_model;

/// Model tokens recognized in free text, in match order.
pub const KNOWN_MODELS: &[&str] = &[
    "A100", "H100", "A6000", "A40", "A10", "V100", "P100", "T4", "RTX", "A800", "A30", "L4",
    "L40", "H200",
];

/// How providers get mentioned in text, mapped to listing display names.
const PROVIDER_MENTIONS: &[(&str, &str)] = &[
    ("runpod", "Runpod"),
    ("vast", "Vast"),
    ("valdi", "Valdi"),
    ("coreweave", "Coreweave"),
    ("digital ocean", "Digital Ocean"),
    ("digitalocean", "Digital Ocean"),
    ("nebius", "Nebius"),
    ("tencent", "Tencent Cloud"),
    ("databasemart", "Database Mart"),
    ("database mart", "Database Mart"),
];

const HIGH_MEMORY_CUES: &[&str] = &["high memory", "large memory", "high vram"];
const BUDGET_CUES: &[&str] = &["cheap", "budget", "affordable"];

pub fn extract_gpu_models(text: &str) -> Vec<&'static str> {
    KNOWN_MODELS
        .iter()
        .copied()
        .filter(|m| text.contains(m))
        .collect()
}

/// Filters implied by an answer. Budget cues override the sort chosen by
/// memory cues; the VRAM range from memory cues stays.
pub fn filters_from_response(text: &str) -> FilterState {
    let lower = text.to_lowercase();
    let mut f = FilterState {
        sort_by: SortKey::PricePerGb,
        sort_direction: SortDirection::Asc,
        ..Default::default()
    };

    if let Some(first) = extract_gpu_models(text).first() {
        f.search_term = first.to_string();
    }

    if HIGH_MEMORY_CUES.iter().any(|c| lower.contains(c)) {
        f.vram_range = (24, 80);
        f.sort_by = SortKey::Vram;
        f.sort_direction = SortDirection::Desc;
    }

    if BUDGET_CUES.iter().any(|c| lower.contains(c)) {
        f.sort_by = SortKey::Price;
        f.sort_direction = SortDirection::Asc;
    }

    for (mention, display) in PROVIDER_MENTIONS {
        if lower.contains(mention) && !f.selected_providers.iter().any(|p| p == display) {
            f.selected_providers.push(display.to_string());
        }
    }
    f
}

/// One line per model mentioned in `text`, naming its cheapest listing.
pub fn recommendation_notes(text: &str, listings: &[GpuListing]) -> Vec<String> {
    extract_gpu_models(text)
        .into_iter()
        .filter_map(|model| {
            let l = cheapest_for_model(listings, model)?;
            Some(format!(
                "{model} ({}GB VRAM) is available from {} at ${:.4}/hour.",
                l.vram_gb, l.provider, l.price_per_hour
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_listings;

    #[test]
    fn models_found_in_fixed_order() {
        assert_eq!(extract_gpu_models("Try an H100 or an L40S."), ["H100", "L4", "L40"]);
        // A10 is a prefix of A100, so both match.
        assert_eq!(extract_gpu_models("A100"), ["A100", "A10"]);
        assert!(extract_gpu_models("any GPU will do").is_empty());
    }

    #[test]
    fn plain_answer_sorts_by_value() {
        let f = filters_from_response("The A100 is a solid choice.");
        assert_eq!(f.search_term, "A100");
        assert_eq!(f.sort_by, SortKey::PricePerGb);
        assert_eq!(f.sort_direction, SortDirection::Asc);
        assert_eq!(f.vram_range, (0, 80));
        assert_eq!(f.price_range, (0.0, 5.0));
    }

    #[test]
    fn high_memory_cue() {
        let f = filters_from_response("For training you want High VRAM cards.");
        assert_eq!(f.vram_range, (24, 80));
        assert_eq!(f.sort_by, SortKey::Vram);
        assert_eq!(f.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn budget_cue_overrides_sort() {
        let f = filters_from_response("A large memory card that is still affordable");
        assert_eq!(f.vram_range, (24, 80));
        assert_eq!(f.sort_by, SortKey::Price);
        assert_eq!(f.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn providers_map_to_display_names() {
        let f = filters_from_response("Check RunPod, Digital Ocean or DigitalOcean and Tencent.");
        assert_eq!(f.selected_providers, ["Runpod", "Digital Ocean", "Tencent Cloud"]);
    }

    #[test]
    fn notes_name_cheapest_listing() {
        let listings = fallback_listings("vast");
        let notes = recommendation_notes("Get an H100", &listings);
        assert_eq!(notes, ["H100 (80GB VRAM) is available from Vast at $1.9900/hour."]);
        assert!(recommendation_notes("Get a P100", &listings).is_empty());
    }
}
