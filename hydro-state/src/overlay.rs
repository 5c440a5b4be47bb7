//! Optional backend facts layered over the generated data for one display
//! update: observed surface area, next-period forecast and anomaly flag.
//!
//! The three calls run concurrently and fail independently. A failure
//! degrades that fact alone; resolution itself never fails.

use hydro_core::{
    backend::{AnalysisRequest, HydroBackend},
    coordinate::{coordinate_from_json, is_valid_coordinate, Coordinate},
    record::SeasonalRecord,
    reservoir::Reservoir,
};
use hydro_data::{generator::volume_series, metrics::capacity_percentage};
use log::{debug, warn};
use serde::Serialize;

/// Label used when the surface area comes from the local generator.
pub const LOCAL_SOURCE: &str = "Local seasonal model (simulation)";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub surface_area: f64,
    pub area_source: String,
    /// True unless a real satellite pass produced the area
    pub is_simulation: bool,
    pub center: Coordinate,
    pub capacity_pct: f64,
    pub forecast: Option<f64>,
    pub is_anomaly: bool,
}

/// Overlay built from generated data only.
pub fn local_overlay(reservoir: &Reservoir, record: &SeasonalRecord) -> Overlay {
    Overlay {
        surface_area: record.surface_area,
        area_source: LOCAL_SOURCE.to_string(),
        is_simulation: true,
        center: reservoir.location.or_fallback(),
        capacity_pct: capacity_percentage(record.volume, reservoir.max_capacity),
        forecast: None,
        is_anomaly: false,
    }
}

/// Volumes of `series` up to and including `record`'s period.
fn history_until(series: &[SeasonalRecord], record: &SeasonalRecord) -> Vec<f64> {
    let end = series
        .iter()
        .position(|r| r.period() == record.period())
        .map(|i| i + 1)
        .unwrap_or(series.len());
    volume_series(&series[..end])
}

/// Ask the backend for water spread, forecast and anomaly in parallel and
/// merge whatever comes back over [`local_overlay`].
pub async fn resolve_overlay<B: HydroBackend + ?Sized>(
    backend: &B,
    reservoir: &Reservoir,
    series: &[SeasonalRecord],
    record: &SeasonalRecord,
) -> Overlay {
    let request = AnalysisRequest::for_record(reservoir, record);
    let volumes = history_until(series, record);
    let (spread, forecast, anomaly) = tokio::join!(
        backend.water_spread(&request),
        backend.forecast(&volumes),
        backend.anomaly(&request),
    );

    let mut overlay = local_overlay(reservoir, record);

    match spread {
        Ok(spread) if spread.surface_area_km2.is_finite() && spread.surface_area_km2 >= 0.0 => {
            overlay.surface_area = spread.surface_area_km2;
            overlay.area_source = spread.source;
            overlay.is_simulation = spread.is_simulation;
            if spread.is_simulation {
                debug!("Simulated water spread for {}, keeping reservoir center", reservoir.id);
            } else if is_valid_coordinate(&spread.polygon_center) {
                overlay.center = coordinate_from_json(&spread.polygon_center);
            } else {
                debug!("Ignoring invalid polygon center for {}", reservoir.id);
            }
        }
        Ok(spread) => warn!(
            "Discarding non-finite surface area {} for {}",
            spread.surface_area_km2, reservoir.id
        ),
        Err(e) => warn!("Water spread unavailable for {}: {}", reservoir.id, e),
    }

    overlay.forecast = match forecast {
        Ok(forecast) if forecast.predicted_volume.is_finite() => {
            Some(forecast.predicted_volume.max(0.0))
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Forecast unavailable for {}: {}", reservoir.id, e);
            None
        }
    };

    overlay.is_anomaly = match anomaly {
        Ok(verdict) => verdict.is_anomaly,
        Err(e) => {
            warn!("Anomaly check unavailable for {}: {}", reservoir.id, e);
            false
        }
    };

    overlay
}
