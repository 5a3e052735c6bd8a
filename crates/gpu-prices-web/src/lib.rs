use wasm_bindgen::prelude::*;

use gpu_prices_core::assist;
use gpu_prices_core::fallback;
use gpu_prices_core::provider::{self, PROVIDERS};
use gpu_prices_core::stats;
use gpu_prices_core::{FilterState, GpuListing};

fn to_js<T: serde::Serialize + ?Sized>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

fn listings_from(v: JsValue) -> Option<Vec<GpuListing>> {
    serde_wasm_bindgen::from_value(v).ok()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a raw scrape result for one provider. `null`/`undefined`
/// yields the provider's fallback listings. Returns GpuListing[].
#[wasm_bindgen]
pub fn normalize(payload: JsValue, provider: &str) -> JsValue {
    if payload.is_null() || payload.is_undefined() {
        return to_js(&gpu_prices_core::normalize(None, provider));
    }
    let raw: serde_json::Value = match serde_wasm_bindgen::from_value(payload) {
        Ok(v) => v,
        Err(_) => return JsValue::NULL,
    };
    to_js(&gpu_prices_core::normalize(Some(&raw), provider))
}

/// Fallback listings for a provider key.
#[wasm_bindgen]
pub fn fallback(provider: &str) -> JsValue {
    to_js(&fallback::fallback_listings(provider))
}

// ---------------------------------------------------------------------------
// Providers
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderJs {
    key: &'static str,
    name: &'static str,
    region: &'static str,
    url: &'static str,
}

#[wasm_bindgen]
pub fn get_providers() -> JsValue {
    let list: Vec<ProviderJs> = PROVIDERS
        .iter()
        .map(|p| ProviderJs {
            key: p.key,
            name: p.display_name,
            region: p.region,
            url: p.url,
        })
        .collect();
    to_js(&list)
}

/// Region for a provider key; unknown keys get a stable pick.
#[wasm_bindgen]
pub fn provider_region(key: &str) -> String {
    provider::determine_region(key).to_string()
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Filter and sort listings. Missing filter fields take their defaults.
#[wasm_bindgen]
pub fn apply_filters(listings: JsValue, filters: JsValue) -> JsValue {
    let Some(listings) = listings_from(listings) else {
        return JsValue::NULL;
    };
    let filters: FilterState = if filters.is_null() || filters.is_undefined() {
        FilterState::default()
    } else {
        match serde_wasm_bindgen::from_value(filters) {
            Ok(f) => f,
            Err(_) => return JsValue::NULL,
        }
    };
    to_js(&gpu_prices_core::apply_filters(&listings, &filters))
}

#[wasm_bindgen]
pub fn provider_stats(listings: JsValue) -> JsValue {
    match listings_from(listings) {
        Some(l) => to_js(&stats::provider_stats(&l)),
        None => JsValue::NULL,
    }
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// Table filters implied by an assistant answer.
#[wasm_bindgen]
pub fn filters_from_response(text: &str) -> JsValue {
    to_js(&assist::filters_from_response(text))
}

/// Price notes for the GPU models an answer mentions. Returns string[].
#[wasm_bindgen]
pub fn recommendation_notes(text: &str, listings: JsValue) -> JsValue {
    match listings_from(listings) {
        Some(l) => to_js(&assist::recommendation_notes(text, &l)),
        None => JsValue::NULL,
    }
}
