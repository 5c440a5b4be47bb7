//! Geographic coordinates and the validator every geographic computation
//! routes through before use.

use serde::{Deserialize, Serialize};

/// Fallback used whenever a coordinate is missing or invalid (central Chennai).
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    lat: 13.0827,
    lng: 80.2707,
};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True iff both components are finite.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// This coordinate if valid, otherwise [`FALLBACK_COORDINATE`].
    pub fn or_fallback(self) -> Coordinate {
        if self.is_valid() {
            self
        } else {
            FALLBACK_COORDINATE
        }
    }

    /// `[lat, lng]`, the pair form map layers consume.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl TryFrom<&[f64]> for Coordinate {
    type Error = ();

    fn try_from(value: &[f64]) -> Result<Self, Self::Error> {
        if !is_valid_pair(value) {
            return Err(());
        }
        Ok(Coordinate::new(value[0], value[1]))
    }
}

/// True iff `pair` has exactly two finite elements.
pub fn is_valid_pair(pair: &[f64]) -> bool {
    pair.len() == 2 && pair.iter().all(|v| v.is_finite())
}

/// Validate an untyped JSON value as a `[lat, lng]` pair.
///
/// Rejects non-arrays, arrays whose length is not 2, and non-numeric
/// elements. Numbers that do not fit an `f64` are rejected as well.
pub fn is_valid_coordinate(value: &serde_json::Value) -> bool {
    match value.as_array() {
        Some(items) if items.len() == 2 => items
            .iter()
            .all(|item| item.as_f64().map(f64::is_finite).unwrap_or(false)),
        _ => false,
    }
}

/// Parse a JSON `[lat, lng]` into a coordinate, falling back when invalid.
pub fn coordinate_from_json(value: &serde_json::Value) -> Coordinate {
    if !is_valid_coordinate(value) {
        return FALLBACK_COORDINATE;
    }
    let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
    let lat = items.first().and_then(serde_json::Value::as_f64);
    let lng = items.get(1).and_then(serde_json::Value::as_f64);
    match (lat, lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => FALLBACK_COORDINATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pair_validation() {
        assert!(is_valid_pair(&[13.16, 80.18]));
        assert!(!is_valid_pair(&[f64::NAN, 80.18]));
        assert!(!is_valid_pair(&[13.16, f64::INFINITY]));
        assert!(!is_valid_pair(&[13.16]));
        assert!(!is_valid_pair(&[13.16, 80.18, 1.0]));
        assert!(!is_valid_pair(&[]));
    }

    #[test]
    fn test_json_validation() {
        assert!(is_valid_coordinate(&json!([13.16, 80.18])));
        assert!(is_valid_coordinate(&json!([0, -180])));
        assert!(!is_valid_coordinate(&json!([13.16])));
        assert!(!is_valid_coordinate(&json!([13.16, 80.18, 0.0])));
        assert!(!is_valid_coordinate(&json!({"lat": 13.16, "lng": 80.18})));
        assert!(!is_valid_coordinate(&json!("13.16,80.18")));
        assert!(!is_valid_coordinate(&json!(["13.16", 80.18])));
        assert!(!is_valid_coordinate(&json!([null, 80.18])));
        assert!(!is_valid_coordinate(&serde_json::Value::Null));
    }

    #[test]
    fn test_fallback() {
        let bad = Coordinate::new(f64::NAN, 80.0);
        assert_eq!(bad.or_fallback(), FALLBACK_COORDINATE);
        let good = Coordinate::new(13.0, 80.0);
        assert_eq!(good.or_fallback(), good);
        assert_eq!(coordinate_from_json(&json!([1.5, 2.5])), Coordinate::new(1.5, 2.5));
        assert_eq!(coordinate_from_json(&json!([1.5])), FALLBACK_COORDINATE);
    }

    #[test]
    fn test_try_from_slice() {
        let pair: &[f64] = &[13.0, 80.0];
        assert_eq!(Coordinate::try_from(pair), Ok(Coordinate::new(13.0, 80.0)));
        let short: &[f64] = &[13.0];
        assert!(Coordinate::try_from(short).is_err());
    }
}
