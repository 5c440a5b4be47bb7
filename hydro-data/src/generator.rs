//! Deterministic seasonal history.
//!
//! The series is a pure function of the reservoir id: the seed comes from
//! the id's last character and the "noise" is `sin(year * season_index)`,
//! so repeated calls reproduce identical records.

use hydro_core::{
    record::SeasonalRecord,
    reservoir::{Reservoir, DEFAULT_FULL_LEVEL, DEFAULT_MAX_CAPACITY},
    season::Season,
};
use hydro_utils::numbers::{clamp_finite, finite_or_zero, round_half_up, round_to, safe_ratio};
use log::debug;

/// First generated year.
pub const START_YEAR: i32 = 2020;

/// Last generated year (inclusive).
pub const END_YEAR: i32 = 2024;

/// Seed used when the id is empty.
pub const FALLBACK_SEED: u32 = 42;

/// Surface area of a full reservoir in square kilometres.
const FULL_SURFACE_AREA: f64 = 15.0;

/// Years covered by every generated series.
pub fn available_years() -> Vec<i32> {
    (START_YEAR..=END_YEAR).collect()
}

/// Seed derived from the code point of the id's last character.
pub fn seed_for(reservoir_id: &str) -> u32 {
    reservoir_id
        .chars()
        .last()
        .map(u32::from)
        .unwrap_or(FALLBACK_SEED)
}

fn base_pct(season: Season) -> f64 {
    match season {
        Season::Winter => 60.0,
        Season::Summer => 30.0,
        Season::Monsoon => 90.0,
        Season::PostMonsoon => 80.0,
    }
}

/// Build one record. `max_capacity` and `full_level` are used as given.
fn seasonal_record(
    seed: u32,
    year: i32,
    season: Season,
    max_capacity: f64,
    full_level: f64,
) -> SeasonalRecord {
    let slope = if seed % 2 == 0 { -2.0 } else { 1.0 };
    let trend = f64::from(year - START_YEAR) * slope;
    // Winter has index 0, so its noise is always 0.
    let noise = (f64::from(year) * season.index() as f64).sin() * 10.0;
    let raw_pct = clamp_finite(base_pct(season) + trend + noise, 10.0, 100.0);
    let fraction = raw_pct / 100.0;

    let volume = clamp_finite(round_half_up(fraction * max_capacity), 0.0, max_capacity.max(0.0));
    let surface_area = round_to(safe_ratio(volume, max_capacity) * FULL_SURFACE_AREA, 2);
    let water_level = round_to(finite_or_zero(fraction * full_level), 1);
    let rainfall = match season {
        Season::Monsoon => 800.0 + noise * 10.0,
        _ => 50.0 + noise,
    };

    SeasonalRecord {
        season,
        year,
        water_level,
        surface_area,
        volume,
        rainfall: round_half_up(rainfall.max(0.0)),
        cloud_cover: if season == Season::Monsoon { 80.0 } else { 10.0 },
    }
}

/// Generate the full 2020..=2024 series for a reservoir id with explicit
/// capacity and full level, in (year, season) order.
pub fn generate_history_with(
    reservoir_id: &str,
    max_capacity: f64,
    full_level: f64,
) -> Vec<SeasonalRecord> {
    let seed = seed_for(reservoir_id);
    let max_capacity = finite_or_zero(max_capacity);
    let full_level = finite_or_zero(full_level);
    (START_YEAR..=END_YEAR)
        .flat_map(|year| {
            Season::ALL
                .into_iter()
                .map(move |season| seasonal_record(seed, year, season, max_capacity, full_level))
        })
        .collect()
}

/// Generate the series for `reservoir_id`, taking capacity and full level
/// from the reference list. Unknown ids use the default constants.
pub fn generate_history(reservoirs: &[Reservoir], reservoir_id: &str) -> Vec<SeasonalRecord> {
    match Reservoir::find(reservoirs, reservoir_id) {
        Some(reservoir) => {
            generate_history_with(reservoir_id, reservoir.max_capacity, reservoir.full_level)
        }
        None => {
            debug!(
                "Unknown reservoir {}, using default capacity {} and level {}",
                reservoir_id, DEFAULT_MAX_CAPACITY, DEFAULT_FULL_LEVEL
            );
            generate_history_with(reservoir_id, DEFAULT_MAX_CAPACITY, DEFAULT_FULL_LEVEL)
        }
    }
}

/// Find the record for a `(year, season)` period.
pub fn find_record(
    series: &[SeasonalRecord],
    year: i32,
    season: Season,
) -> Option<&SeasonalRecord> {
    series.iter().find(|r| r.period() == (year, season))
}

/// Volumes of a series in order, as fed to the forecast model.
pub fn volume_series(series: &[SeasonalRecord]) -> Vec<f64> {
    series.iter().map(|r| r.volume).collect()
}
