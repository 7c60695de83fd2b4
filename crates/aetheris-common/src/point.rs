//! Geographic point selection.

use serde::{Deserialize, Serialize};

use crate::error::{AetherisError, AetherisResult};

/// A latitude/longitude pair selected on the map.
///
/// Both components are validated to be finite on construction; everything
/// downstream can assume a well-formed point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> AetherisResult<Self> {
        if !lat.is_finite() {
            return Err(AetherisError::invalid("lat", "latitude must be a finite number"));
        }
        if !lng.is_finite() {
            return Err(AetherisError::invalid("lng", "longitude must be a finite number"));
        }
        Ok(Self { lat, lng })
    }

    /// GeoJSON coordinate order: [lng, lat].
    pub fn geojson_coordinates(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let p = GeoPoint::new(-14.2, -51.9).unwrap();
        assert_eq!(p.lat, -14.2);
        assert_eq!(p.lng, -51.9);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(GeoPoint::new(f64::NAN, -51.9).is_err());
        assert!(GeoPoint::new(-14.2, f64::NAN).is_err());
    }

    #[test]
    fn test_infinite_rejected() {
        assert!(GeoPoint::new(f64::INFINITY, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_geojson_order_is_lng_lat() {
        let p = GeoPoint::new(-7.12, -36.72).unwrap();
        assert_eq!(p.geojson_coordinates(), [-36.72, -7.12]);
    }
}
