//! Tests for the query API request/response surface.
//!
//! These focus on the wire shapes and the request-shaping policy without
//! requiring a database or remote services.

use aetheris_common::{ProductRecord, Variable};
use query_api::policy::{resolve_bands, split_csv};

fn product(bands: &[&str]) -> ProductRecord {
    ProductRecord {
        product_name: "S2-16D-2".to_string(),
        friendly_name: "Sentinel-2 (Data Cube 16D)".to_string(),
        description: Some("Sentinel-2 data cube".to_string()),
        variables: bands.iter().map(|b| Variable::named(*b)).collect(),
        platform_id: Some("sentinel2".to_string()),
    }
}

// ============================================================================
// Response wire format
// ============================================================================

/// The geodata response uses the camelCase names the frontend reads.
#[test]
fn test_product_wire_format() {
    let json = serde_json::to_value(vec![product(&["NDVI", "EVI"])]).unwrap();

    let first = &json[0];
    assert_eq!(first["productName"], "S2-16D-2");
    assert_eq!(first["friendlyName"], "Sentinel-2 (Data Cube 16D)");
    assert_eq!(first["platformId"], "sentinel2");
    assert_eq!(first["variables"][0]["name"], "NDVI");
}

#[test]
fn test_product_parses_from_wire_format() {
    let record: ProductRecord = serde_json::from_value(serde_json::json!({
        "productName": "LANDSAT-16D-1",
        "friendlyName": "Landsat (Data Cube 16D)",
        "variables": [{"name": "NDVI"}, {"id": "B04"}],
        "platformId": null
    }))
    .unwrap();

    assert_eq!(record.product_name, "LANDSAT-16D-1");
    assert_eq!(record.declared_bands(), vec!["NDVI", "B04"]);
    assert!(record.platform_id.is_none());
}

// ============================================================================
// Band resolution policy, end to end over the wire types
// ============================================================================

#[test]
fn test_bands_query_with_undeclared_band_falls_back() {
    let p = product(&["B1", "B2", "B3"]);
    let requested = split_csv(Some("B1,ZZZ"));
    let resolved = resolve_bands(&p, &requested).unwrap();
    assert_eq!(resolved, vec!["B1", "B2"]);
}

#[test]
fn test_bands_query_fully_declared_is_honored() {
    let p = product(&["B1", "B2", "B3"]);
    let requested = split_csv(Some(" B2 , B3 "));
    let resolved = resolve_bands(&p, &requested).unwrap();
    assert_eq!(resolved, vec!["B2", "B3"]);
}

#[test]
fn test_missing_bands_query_uses_default_prefix() {
    let p = product(&["B1", "B2", "B3"]);
    let resolved = resolve_bands(&p, &split_csv(None)).unwrap();
    assert_eq!(resolved, vec!["B1", "B2"]);
}
