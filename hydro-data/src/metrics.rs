//! Display metrics derived from a record and its reservoir.
//!
//! Every percentage or ratio here goes through the non-finite guard, so a
//! consumer never sees NaN or an infinity.

use hydro_core::{record::SeasonalRecord, reservoir::Reservoir};
use hydro_utils::numbers::{finite_or_zero, safe_percentage};
use serde::Serialize;

/// Capacity percentage, `volume / max_capacity * 100`, or 0 when undefined.
pub fn capacity_percentage(volume: f64, max_capacity: f64) -> f64 {
    safe_percentage(volume, max_capacity)
}

/// Values shown for the selected period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub capacity_pct: f64,
    pub volume: f64,
    pub water_level: f64,
    pub surface_area: f64,
}

impl DerivedMetrics {
    pub fn from_record(record: &SeasonalRecord, reservoir: &Reservoir) -> Self {
        Self {
            capacity_pct: capacity_percentage(record.volume, reservoir.max_capacity),
            volume: finite_or_zero(record.volume),
            water_level: finite_or_zero(record.water_level),
            surface_area: finite_or_zero(record.surface_area),
        }
    }

    /// Replace the generated surface area with an observed one, if usable.
    pub fn with_observed_area(mut self, observed_area: Option<f64>) -> Self {
        if let Some(area) = observed_area.filter(|a| a.is_finite()) {
            self.surface_area = area;
        }
        self
    }
}

/// Capacity-percentage points gained (positive) or lost since `comparison`.
pub fn capacity_delta(
    primary: &SeasonalRecord,
    comparison: &SeasonalRecord,
    reservoir: &Reservoir,
) -> f64 {
    finite_or_zero(
        capacity_percentage(primary.volume, reservoir.max_capacity)
            - capacity_percentage(comparison.volume, reservoir.max_capacity),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{find_record, generate_history};
    use hydro_core::season::Season;

    #[test]
    fn test_division_guard() {
        assert_eq!(capacity_percentage(56.0, 0.0), 0.0);
        assert_eq!(capacity_percentage(f64::NAN, 93.0), 0.0);
        assert_eq!(capacity_percentage(f64::INFINITY, 93.0), 0.0);
        assert_eq!(capacity_percentage(50.0, 100.0), 50.0);
    }

    #[test]
    fn test_from_record() {
        let reservoirs = Reservoir::get_reservoir_vector().unwrap();
        let red_hills = Reservoir::find(&reservoirs, "res-redhills").unwrap();
        let series = generate_history(&reservoirs, "res-redhills");
        let record = find_record(&series, 2020, Season::Winter).unwrap();
        let metrics = DerivedMetrics::from_record(record, red_hills);
        assert!((metrics.capacity_pct - 56.0 / 93.0 * 100.0).abs() < 1e-9);
        assert_eq!(metrics.surface_area, 9.03);

        let observed = metrics.clone().with_observed_area(Some(12.5));
        assert_eq!(observed.surface_area, 12.5);
        let rejected = metrics.with_observed_area(Some(f64::NAN));
        assert_eq!(rejected.surface_area, 9.03);
    }

    #[test]
    fn test_capacity_delta() {
        let reservoirs = Reservoir::get_reservoir_vector().unwrap();
        let red_hills = Reservoir::find(&reservoirs, "res-redhills").unwrap();
        let series = generate_history(&reservoirs, "res-redhills");
        let winter = find_record(&series, 2020, Season::Winter).unwrap();
        let same = capacity_delta(winter, winter, red_hills);
        assert_eq!(same, 0.0);

        let mut empty = red_hills.clone();
        empty.max_capacity = 0.0;
        let summer = find_record(&series, 2020, Season::Summer).unwrap();
        assert_eq!(capacity_delta(winter, summer, &empty), 0.0);
    }
}
