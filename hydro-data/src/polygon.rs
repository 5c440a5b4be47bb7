//! Approximate water-extent ring for the map layer.
//!
//! Unlike the seasonal history this is intentionally jittered: each call
//! produces a slightly different "organic" outline. Only point count and
//! coordinate validity are stable.

use hydro_core::coordinate::{is_valid_pair, Coordinate};
use hydro_utils::numbers::{clamp_finite, finite_or_zero};
use rand::Rng;

/// Number of vertices in a full ring.
pub const POLYGON_POINTS: usize = 20;

/// Radius in degrees of a reservoir at 100% capacity.
pub const BASE_RADIUS_DEG: f64 = 0.015;

/// Longitude stretch giving the ring an oval shape.
const LNG_STRETCH: f64 = 1.2;

/// Build a ring for `center` at `capacity_pct` using the thread RNG.
pub fn water_polygon(center: Coordinate, capacity_pct: f64) -> Vec<[f64; 2]> {
    water_polygon_with(&mut rand::thread_rng(), center, capacity_pct)
}

/// Build a ring with an explicit RNG.
///
/// An invalid center is replaced by the fallback coordinate; non-finite
/// points are dropped rather than reported.
pub fn water_polygon_with<R: Rng>(
    rng: &mut R,
    center: Coordinate,
    capacity_pct: f64,
) -> Vec<[f64; 2]> {
    let center = center.or_fallback();
    let pct = clamp_finite(finite_or_zero(capacity_pct), 0.0, 100.0);
    let base_radius = BASE_RADIUS_DEG * (pct / 100.0);
    let step = 360.0 / POLYGON_POINTS as f64;

    (0..POLYGON_POINTS)
        .filter_map(|i| {
            let angle = (i as f64 * step).to_radians();
            let radius = base_radius * (0.8 + rng.gen::<f64>() * 0.4);
            let point = [
                center.lat + radius * angle.cos(),
                center.lng + radius * angle.sin() * LNG_STRETCH,
            ];
            is_valid_pair(&point).then_some(point)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::coordinate::FALLBACK_COORDINATE;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_ring_is_valid_and_bounded() {
        let center = Coordinate::new(13.162, 80.181);
        for pct in [0.0, 25.0, 60.2, 100.0, 250.0, -10.0] {
            let ring = water_polygon(center, pct);
            assert!(ring.len() <= POLYGON_POINTS);
            assert!(ring.iter().all(|p| is_valid_pair(p)));
        }
    }

    #[test]
    fn test_points_stay_within_jittered_radius() {
        let center = Coordinate::new(13.162, 80.181);
        let ring = water_polygon(center, 100.0);
        assert_eq!(ring.len(), POLYGON_POINTS);
        let max_offset = BASE_RADIUS_DEG * 1.2 * LNG_STRETCH + 1e-12;
        for [lat, lng] in ring {
            assert!((lat - center.lat).abs() <= max_offset);
            assert!((lng - center.lng).abs() <= max_offset);
        }
    }

    #[test]
    fn test_invalid_center_uses_fallback() {
        let ring = water_polygon(Coordinate::new(f64::NAN, f64::INFINITY), 50.0);
        assert_eq!(ring.len(), POLYGON_POINTS);
        for [lat, lng] in ring {
            assert!((lat - FALLBACK_COORDINATE.lat).abs() < 0.02);
            assert!((lng - FALLBACK_COORDINATE.lng).abs() < 0.03);
        }
    }

    #[test]
    fn test_non_finite_pct_collapses_to_center() {
        let center = Coordinate::new(13.0, 80.0);
        let ring = water_polygon(center, f64::NAN);
        assert!(ring.iter().all(|p| *p == [13.0, 80.0]));
    }

    #[test]
    fn test_injected_rng_is_reproducible() {
        let center = Coordinate::new(13.0, 80.0);
        let a = water_polygon_with(&mut StdRng::seed_from_u64(7), center, 70.0);
        let b = water_polygon_with(&mut StdRng::seed_from_u64(7), center, 70.0);
        assert_eq!(a, b);
    }
}
