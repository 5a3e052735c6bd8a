//! Per-field extraction from row candidates.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

pub const MODEL_FIELD: &str = "gpuModel";
pub const VRAM_FIELD: &str = "vramSize";
pub const PRICE_FIELD: &str = "pricePerHour";

// ASCII digits only: `\d` also matches full-width and other Unicode digits,
// which `str::parse` rejects.
static VRAM_WITH_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*(?:GB|G)").expect("valid vram regex"));
static BARE_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)").expect("valid int regex"));
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?([0-9]+\.?[0-9]*)").expect("valid price regex"));

/// Text for `key` in a candidate row. Object rows are looked up by key,
/// array rows by their first element, scalar rows stand for every field.
pub fn field_text(candidate: &Value, key: &str) -> String {
    match candidate {
        Value::Object(obj) => obj.get(key).map(stringify).unwrap_or_default(),
        Value::Array(items) => items
            .first()
            .map(|first| field_text(first, key))
            .unwrap_or_default(),
        other => stringify(other),
    }
}

/// Flatten a scraped value to text: arrays collapse to their first element,
/// objects to compact JSON, null to "".
pub fn stringify(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.first().map(stringify).unwrap_or_default(),
        Value::Object(_) => v.to_string(),
    }
}

/// Model label, or `GPU {index + 1}` when shorter than `min_len` chars.
pub fn extract_model(text: &str, index: usize, min_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() < min_len {
        format!("GPU {}", index + 1)
    } else {
        trimmed.to_string()
    }
}

/// VRAM in GB: a number followed by `GB`/`G`, else the first integer, else 0.
pub fn extract_vram_gb(text: &str) -> u32 {
    VRAM_WITH_UNIT
        .captures(text)
        .or_else(|| BARE_INT.captures(text))
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

/// Hourly price: first decimal number, optionally `$`-prefixed, else 0.
pub fn extract_price(text: &str) -> f64 {
    PRICE
        .captures(text)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0.0)
}
