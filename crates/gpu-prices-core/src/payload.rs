//! Classify loosely-typed scrape payloads into a closed set of shapes.
//!
//! Scrape results arrive as whatever the scraping service produced: a raw
//! page envelope, a selector map of per-field columns, a column-major object,
//! an array of row objects, or a single object. [`classify`] inspects the
//! payload once; [`PayloadShape::candidates`] then turns each shape into a
//! list of row candidates for field extraction.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::error::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    /// Has an `html` string: the page itself, not extracted data.
    RawHtml,
    /// Has `meta`/`formats`, or both `html` and `markdown`.
    Metadata,
}

impl EnvelopeKind {
    fn label(self) -> &'static str {
        match self {
            Self::RawHtml => "raw html",
            Self::Metadata => "metadata",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape<'a> {
    Missing,
    Envelope(EnvelopeKind),
    /// Array of row items.
    Rows(&'a [Value]),
    /// `{ "selectors": { field: value | [values] } }`.
    SelectorColumns(&'a Map<String, Value>),
    /// Object whose first key holds an array; every array key is a column.
    Columns(&'a Map<String, Value>),
    Single(&'a Value),
    Unrecognized(&'static str),
}

pub fn classify(raw: Option<&Value>) -> PayloadShape<'_> {
    let value = match raw {
        None | Some(Value::Null) => return PayloadShape::Missing,
        Some(v) => v,
    };

    let obj = match value {
        Value::Array(items) => return PayloadShape::Rows(items),
        Value::Object(obj) => obj,
        Value::String(_) => return PayloadShape::Unrecognized("bare string"),
        Value::Number(_) => return PayloadShape::Unrecognized("bare number"),
        Value::Bool(_) => return PayloadShape::Unrecognized("bare bool"),
        Value::Null => return PayloadShape::Missing,
    };

    if let Some(kind) = envelope_kind(obj) {
        return PayloadShape::Envelope(kind);
    }

    match obj.get("selectors") {
        Some(Value::Object(sel)) => return PayloadShape::SelectorColumns(sel),
        Some(v) if is_truthy(v) => return PayloadShape::Unrecognized("selectors is not an object"),
        _ => {}
    }

    match obj.values().next() {
        Some(Value::Array(_)) => PayloadShape::Columns(obj),
        _ => PayloadShape::Single(value),
    }
}

fn envelope_kind(obj: &Map<String, Value>) -> Option<EnvelopeKind> {
    if matches!(obj.get("html"), Some(Value::String(s)) if !s.is_empty()) {
        return Some(EnvelopeKind::RawHtml);
    }
    let flagged = |k: &str| obj.get(k).is_some_and(is_truthy);
    if flagged("meta")
        || flagged("formats")
        || (obj.contains_key("html") && obj.contains_key("markdown"))
    {
        return Some(EnvelopeKind::Metadata);
    }
    None
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl<'a> PayloadShape<'a> {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Envelope(k) => k.label(),
            Self::Rows(_) => "rows",
            Self::SelectorColumns(_) => "selector columns",
            Self::Columns(_) => "columns",
            Self::Single(_) => "single object",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Why this shape carries no usable rows, if it doesn't.
    pub fn rejection(&self) -> Option<NormalizeError> {
        match self {
            Self::Missing => Some(NormalizeError::NoPayload),
            Self::Envelope(k) => Some(NormalizeError::Envelope(k.label())),
            Self::Unrecognized(why) => Some(NormalizeError::Unrecognized(*why)),
            _ => None,
        }
    }

    /// Row candidates, in payload order.
    pub fn candidates(&self) -> Vec<Cow<'a, Value>> {
        match self {
            Self::Rows(items) => (*items).iter().map(Cow::Borrowed).collect(),
            Self::SelectorColumns(cols) | Self::Columns(cols) => zip_columns(cols),
            Self::Single(v) => vec![Cow::Borrowed(*v)],
            Self::Missing | Self::Envelope(_) | Self::Unrecognized(_) => Vec::new(),
        }
    }
}

/// Rebuild rows from column arrays. The first column sets the row count and
/// row `i` collects element `i` of every array column. A scalar first column
/// means the map is already one row.
fn zip_columns(cols: &Map<String, Value>) -> Vec<Cow<'static, Value>> {
    let Some(first) = cols.values().next() else {
        return Vec::new();
    };
    let Value::Array(first) = first else {
        return vec![Cow::Owned(Value::Object(cols.clone()))];
    };

    (0..first.len())
        .filter_map(|i| {
            let row: Map<String, Value> = cols
                .iter()
                .filter_map(|(k, v)| Some((k.clone(), v.as_array()?.get(i)?.clone())))
                .collect();
            (!row.is_empty()).then(|| Cow::Owned(Value::Object(row)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_absent_are_missing() {
        assert_eq!(classify(None), PayloadShape::Missing);
        assert_eq!(classify(Some(&Value::Null)), PayloadShape::Missing);
    }

    #[test]
    fn html_envelopes() {
        let raw = json!({"html": "<html></html>"});
        assert_eq!(classify(Some(&raw)), PayloadShape::Envelope(EnvelopeKind::RawHtml));

        let meta = json!({"markdown": "# Pricing", "meta": {"title": "x"}});
        assert_eq!(classify(Some(&meta)), PayloadShape::Envelope(EnvelopeKind::Metadata));

        let both = json!({"html": "", "markdown": ""});
        assert_eq!(classify(Some(&both)), PayloadShape::Envelope(EnvelopeKind::Metadata));

        let formats = json!({"formats": ["html"], "gpuModel": ["A100"]});
        assert_eq!(classify(Some(&formats)), PayloadShape::Envelope(EnvelopeKind::Metadata));
    }

    #[test]
    fn envelope_check_wins_over_selectors() {
        let v = json!({"html": "<p/>", "selectors": {"gpuModel": ["A100"]}});
        assert_eq!(classify(Some(&v)), PayloadShape::Envelope(EnvelopeKind::RawHtml));
    }

    #[test]
    fn selector_columns_zip_by_index() {
        let v = json!({"selectors": {
            "gpuModel": ["A100", "H100", "L4"],
            "vramSize": ["80GB", "80GB"],
            "pricePerHour": "$1.00"
        }});
        let shape = classify(Some(&v));
        assert!(matches!(shape, PayloadShape::SelectorColumns(_)));
        let rows = shape.candidates();
        assert_eq!(rows.len(), 3);
        assert_eq!(*rows[0], json!({"gpuModel": "A100", "vramSize": "80GB"}));
        assert_eq!(*rows[2], json!({"gpuModel": "L4"}));
    }

    #[test]
    fn scalar_selectors_make_one_row() {
        let v = json!({"selectors": {"gpuModel": "A100", "vramSize": ["80GB", "40GB"]}});
        let rows = classify(Some(&v)).candidates();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["vramSize"], json!(["80GB", "40GB"]));
    }

    #[test]
    fn empty_selectors_yield_nothing() {
        let v = json!({"selectors": {}});
        assert!(classify(Some(&v)).candidates().is_empty());
    }

    #[test]
    fn column_major_object() {
        let v = json!({"gpuModel": ["A100", "H100"], "note": "scraped", "pricePerHour": ["$2", "$4"]});
        let shape = classify(Some(&v));
        assert!(matches!(shape, PayloadShape::Columns(_)));
        let rows = shape.candidates();
        assert_eq!(rows.len(), 2);
        assert_eq!(*rows[1], json!({"gpuModel": "H100", "pricePerHour": "$4"}));
    }

    #[test]
    fn first_key_decides_columns_vs_single() {
        let v = json!({"note": "x", "gpuModel": ["A100", "H100"]});
        let shape = classify(Some(&v));
        assert!(matches!(shape, PayloadShape::Single(_)));
        assert_eq!(shape.candidates().len(), 1);
    }

    #[test]
    fn arrays_are_rows() {
        let v = json!([{"gpuModel": "A100"}, {"gpuModel": "H100"}]);
        let shape = classify(Some(&v));
        assert_eq!(shape.label(), "rows");
        assert_eq!(shape.candidates().len(), 2);
        assert!(shape.rejection().is_none());
    }

    #[test]
    fn scalars_are_rejected() {
        let v = json!("A100 80GB $2.50");
        let shape = classify(Some(&v));
        assert!(matches!(shape.rejection(), Some(NormalizeError::Unrecognized(_))));
        assert!(shape.candidates().is_empty());
    }
}
