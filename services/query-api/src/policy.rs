//! Request shaping policies: band resolution and the default time window.

use chrono::{Duration, Utc};

use aetheris_common::{AetherisError, AetherisResult, ProductRecord};

/// Days covered by a timeseries request that carries no explicit window.
const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Resolve the band list actually sent upstream.
///
/// Caller bands are honored only when every one of them is declared by the
/// product; any unknown band silently discards the whole request list in
/// favor of the default prefix. A partially-valid request is never issued.
pub fn resolve_bands(product: &ProductRecord, requested: &[String]) -> AetherisResult<Vec<String>> {
    let declared = product.declared_bands();
    if declared.is_empty() {
        return Err(AetherisError::NoDeclaredBands(product.product_name.clone()));
    }

    if !requested.is_empty() && requested.iter().all(|b| declared.contains(b)) {
        return Ok(requested.to_vec());
    }

    Ok(product.default_bands())
}

/// Resolve the request window. A partial window is treated the same as no
/// window at all: unless both bounds are supplied, the whole window becomes
/// `[today - 365 days, today]`.
pub fn resolve_window(start_date: Option<&str>, end_date: Option<&str>) -> (String, String) {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        return (start.to_string(), end.to_string());
    }
    let today = Utc::now().date_naive();
    let start = (today - Duration::days(DEFAULT_WINDOW_DAYS))
        .format("%Y-%m-%d")
        .to_string();
    (start, today.format("%Y-%m-%d").to_string())
}

/// Split a comma-separated query value into trimmed non-empty items.
pub fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    use aetheris_common::Variable;

    fn product(bands: &[&str]) -> ProductRecord {
        ProductRecord {
            product_name: "S2-16D-2".to_string(),
            friendly_name: "Sentinel-2 (Data Cube 16D)".to_string(),
            description: None,
            variables: bands.iter().map(|b| Variable::named(*b)).collect(),
            platform_id: Some("sentinel2".to_string()),
        }
    }

    fn bands(names: &[&str]) -> Vec<String> {
        names.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_valid_requested_bands_pass_through() {
        let p = product(&["B1", "B2", "B3"]);
        let resolved = resolve_bands(&p, &bands(&["B3", "B1"])).unwrap();
        assert_eq!(resolved, vec!["B3", "B1"]);
    }

    #[test]
    fn test_any_unknown_band_falls_back_to_default_prefix() {
        let p = product(&["B1", "B2", "B3"]);
        // not ["B1"]: a partially-valid request is never issued
        let resolved = resolve_bands(&p, &bands(&["B1", "ZZZ"])).unwrap();
        assert_eq!(resolved, vec!["B1", "B2"]);
    }

    #[test]
    fn test_no_requested_bands_uses_default_prefix() {
        let p = product(&["B1", "B2", "B3"]);
        assert_eq!(resolve_bands(&p, &[]).unwrap(), vec!["B1", "B2"]);
    }

    #[test]
    fn test_product_without_bands_is_an_error() {
        let p = product(&[]);
        assert!(matches!(
            resolve_bands(&p, &[]),
            Err(AetherisError::NoDeclaredBands(_))
        ));
    }

    #[test]
    fn test_window_defaults_to_one_year() {
        let (start, end) = resolve_window(None, None);
        let start = chrono::NaiveDate::parse_from_str(&start, "%Y-%m-%d").unwrap();
        let end = chrono::NaiveDate::parse_from_str(&end, "%Y-%m-%d").unwrap();
        assert_eq!(end - start, Duration::days(365));
    }

    #[test]
    fn test_explicit_window_passes_through() {
        let (start, end) = resolve_window(Some("2023-01-01"), Some("2023-06-30"));
        assert_eq!(start, "2023-01-01");
        assert_eq!(end, "2023-06-30");
    }

    #[test]
    fn test_partial_window_defaults_both_bounds() {
        let today = Utc::now().date_naive();
        let expected_start = (today - Duration::days(365)).format("%Y-%m-%d").to_string();
        let expected_end = today.format("%Y-%m-%d").to_string();

        let (start, end) = resolve_window(Some("2023-01-01"), None);
        assert_eq!(start, expected_start);
        assert_eq!(end, expected_end);

        let (start, end) = resolve_window(None, Some("2024-06-30"));
        assert_eq!(start, expected_start);
        assert_eq!(end, expected_end);
    }

    #[test]
    fn test_split_csv() {
        assert_eq!(split_csv(Some("a, b ,,c")), vec!["a", "b", "c"]);
        assert!(split_csv(Some("")).is_empty());
        assert!(split_csv(None).is_empty());
    }
}
