use gpu_prices_core::fallback::catalog_for;
use gpu_prices_core::normalize::{normalize, DEFAULT_PRICE_PER_HOUR, DEFAULT_VRAM_GB};
use gpu_prices_core::GpuListing;
use serde_json::{json, Value};

fn assert_invariants(listings: &[GpuListing]) {
    assert!(!listings.is_empty(), "normalize must never return nothing");
    for l in listings {
        assert!(l.vram_gb > 0, "{}: vram must be positive", l.gpu_model);
        assert!(l.price_per_hour > 0.0, "{}: price must be positive", l.gpu_model);
        assert!(!l.gpu_model.is_empty());
        assert_eq!(l.price_per_gb_vram(), l.price_per_hour / l.vram_gb as f64);
    }
}

#[test]
fn null_payload_serves_provider_catalog() {
    let out = normalize(None, "runpod");
    let expected = catalog_for("runpod");
    assert_eq!(out.len(), expected.len());
    for (l, o) in out.iter().zip(expected) {
        assert_eq!(l.gpu_model, o.model);
        assert_eq!(l.vram_gb, o.vram_gb);
        assert_eq!(l.price_per_hour, o.price_per_hour);
        assert_eq!(l.region, "US West");
        assert_eq!(l.provider, "Runpod");
    }
    assert_eq!(normalize(Some(&Value::Null), "runpod").len(), expected.len());
}

#[test]
fn selector_payload_zips_rows() {
    let payload = json!({ "selectors": {
        "gpuModel": ["A100", "H100"],
        "vramSize": ["80GB", "80GB"],
        "pricePerHour": ["$2.50", "$4.00"]
    }});
    let out = normalize(Some(&payload), "digitalOcean");
    assert_invariants(&out);
    assert_eq!(out.len(), 2);

    assert_eq!(out[0].provider, "Digital Ocean");
    assert_eq!(out[0].gpu_model, "A100");
    assert_eq!(out[0].vram_gb, 80);
    assert_eq!(out[0].price_per_hour, 2.50);
    assert_eq!(out[0].price_per_gb_vram(), 0.03125);
    assert_eq!(out[0].region, "US East");

    assert_eq!(out[1].gpu_model, "H100");
    assert_eq!(out[1].vram_gb, 80);
    assert_eq!(out[1].price_per_hour, 4.00);
    assert_eq!(out[1].price_per_gb_vram(), 0.05);
}

#[test]
fn empty_model_gets_placeholder() {
    let payload = json!([{"gpuModel": "", "vramSize": "48GB", "pricePerHour": "$1.10"}]);
    let out = normalize(Some(&payload), "vast");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].gpu_model, "GPU 1");
    assert_eq!(out[0].vram_gb, 48);
}

#[test]
fn placeholder_index_follows_row_position() {
    let payload = json!([
        {"gpuModel": "A100"},
        {"gpuModel": "H"},
        {"vramSize": "24GB"}
    ]);
    let out = normalize(Some(&payload), "vast");
    let models: Vec<_> = out.iter().map(|l| l.gpu_model.as_str()).collect();
    assert_eq!(models, ["A100", "GPU 2", "GPU 3"]);
}

#[test]
fn raw_html_envelope_falls_back() {
    let payload = json!({"html": "<html><body><td>A100</td><td>$2.50</td></body></html>"});
    let out = normalize(Some(&payload), "coreweave");
    assert_eq!(out.len(), catalog_for("coreweave").len());
    assert_eq!(out[0].gpu_model, catalog_for("coreweave")[0].model);
}

#[test]
fn metadata_envelope_falls_back() {
    let payload = json!({"markdown": "| GPU | Price |", "metadata": {}, "formats": ["markdown"]});
    let out = normalize(Some(&payload), "valdi");
    assert_eq!(out.len(), catalog_for("valdi").len());
    assert!(out.iter().all(|l| l.region == "US North"));
}

#[test]
fn column_object_without_selectors() {
    let payload = json!({
        "gpuModel": ["RTX 4090", "L40S"],
        "vramSize": ["24 GB", "48 GB"],
        "pricePerHour": ["0.44", "$0.99/hr"]
    });
    let out = normalize(Some(&payload), "nebius");
    assert_invariants(&out);
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].gpu_model, "L40S");
    assert_eq!(out[1].vram_gb, 48);
    assert_eq!(out[1].price_per_hour, 0.99);
}

#[test]
fn single_object_is_one_row() {
    let payload = json!({"gpuModel": "T4", "vramSize": 16, "pricePerHour": 0.35});
    let out = normalize(Some(&payload), "tencentCloud");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].provider, "Tencent Cloud");
    assert_eq!(out[0].vram_gb, 16);
    assert_eq!(out[0].price_per_hour, 0.35);
    assert_eq!(out[0].region, "Asia Pacific");
}

#[test]
fn defaults_apply_per_field() {
    let payload = json!([{"gpuModel": "MI300X", "vramSize": "0GB", "pricePerHour": "$0.00"}]);
    let out = normalize(Some(&payload), "vast");
    assert_eq!(out[0].vram_gb, DEFAULT_VRAM_GB);
    assert_eq!(out[0].price_per_hour, DEFAULT_PRICE_PER_HOUR);
    assert_eq!(out[0].gpu_model, "MI300X");
}

#[test]
fn wide_digits_do_not_hide_ascii_numbers() {
    let payload = json!([{"gpuModel": "T4", "vramSize": "Ｔ４ 16", "pricePerHour": "¥５ / $2.50"}]);
    let out = normalize(Some(&payload), "tencentCloud");
    assert_eq!(out[0].vram_gb, 16);
    assert_eq!(out[0].price_per_hour, 2.50);
}

#[test]
fn never_empty_for_odd_payloads() {
    let payloads = [
        json!([]),
        json!({}),
        json!("just text"),
        json!(42),
        json!(true),
        json!({"selectors": {}}),
        json!({"selectors": "oops"}),
        json!([null, 3, "x"]),
        json!({"gpuModel": []}),
    ];
    for p in &payloads {
        for key in ["runpod", "someNewCloud", ""] {
            let out = normalize(Some(p), key);
            assert_invariants(&out);
        }
    }
}

#[test]
fn unknown_provider_region_is_stable() {
    let a = normalize(None, "lambdaLabs");
    let b = normalize(None, "lambdaLabs");
    assert_eq!(a.len(), 8);
    assert_eq!(a[0].region, b[0].region);
    assert_eq!(a[0].provider, "Lambda Labs");
}

#[test]
fn repeated_calls_differ_only_in_timestamp() {
    let payload = json!({"selectors": {
        "gpuModel": ["A100", "H100"],
        "vramSize": ["80GB", "80GB"],
        "pricePerHour": ["$2.50", "$4.00"]
    }});
    let strip = |mut v: Vec<GpuListing>| {
        for l in &mut v {
            l.scrape_timestamp.clear();
        }
        v
    };
    let a = strip(normalize(Some(&payload), "digitalOcean"));
    let b = strip(normalize(Some(&payload), "digitalOcean"));
    assert_eq!(a, b);
}

#[test]
fn serialized_listing_has_front_end_fields() {
    let out = normalize(None, "vast");
    let v = serde_json::to_value(&out[0]).unwrap();
    for field in [
        "provider",
        "gpuModel",
        "vramGB",
        "pricePerHour",
        "pricePerGBVram",
        "region",
        "scrapeTimestamp",
    ] {
        assert!(v.get(field).is_some(), "missing {field}");
    }
}
