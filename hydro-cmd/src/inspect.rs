//! Commands that only use the embedded reference data and the generator.

use crate::PeriodArgs;
use hydro_core::{record::SeasonalRecord, reservoir::Reservoir, season::Season};
use hydro_data::{
    generator::{find_record, generate_history},
    metrics::{capacity_delta, DerivedMetrics},
    polygon::water_polygon,
};
use log::info;
use serde::Serialize;

/// A resolved period: its reservoir, full series and selected record.
pub struct Selected {
    pub reservoir: Reservoir,
    pub series: Vec<SeasonalRecord>,
    pub record: SeasonalRecord,
}

/// Resolve `period` against the reference list. Unknown reservoirs use the
/// default parameters; a period outside the generated range is an error.
pub fn select(period: &PeriodArgs) -> anyhow::Result<Selected> {
    let reservoirs = Reservoir::get_reservoir_vector()?;
    let reservoir = Reservoir::find_or_placeholder(&reservoirs, &period.reservoir);
    let series = generate_history(&reservoirs, &period.reservoir);
    let record = find_record(&series, period.year, period.season)
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No record for {} {} (generated years are 2020-2024)",
                period.season,
                period.year
            )
        })?;
    Ok(Selected {
        reservoir,
        series,
        record,
    })
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run_reservoirs() -> anyhow::Result<()> {
    let reservoirs = Reservoir::get_reservoir_vector()?;
    for r in &reservoirs {
        println!(
            "{:<22} {:<32} {:>7.1} MCM  FRL {:>5.1} m  ({:.4}, {:.4})",
            r.id, r.name, r.max_capacity, r.full_level, r.location.lat, r.location.lng
        );
    }
    Ok(())
}

/// Render a series as CSV with a header row.
pub fn history_csv(series: &[SeasonalRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "year",
        "season",
        "volume",
        "water_level",
        "surface_area",
        "rainfall",
        "cloud_cover",
    ])?;
    for r in series {
        wtr.write_record([
            r.year.to_string(),
            r.season.to_string(),
            r.volume.to_string(),
            r.water_level.to_string(),
            r.surface_area.to_string(),
            r.rainfall.to_string(),
            r.cloud_cover.to_string(),
        ])?;
    }
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

pub fn run_history(reservoir_id: &str, output: Option<&str>) -> anyhow::Result<()> {
    let reservoirs = Reservoir::get_reservoir_vector()?;
    let series = generate_history(&reservoirs, reservoir_id);
    let body = history_csv(&series)?;
    match output {
        Some(path) => {
            std::fs::write(path, &body)?;
            info!("Wrote {} records for {} to {}", series.len(), reservoir_id, path);
        }
        None => print!("{}", body),
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordView<'a> {
    reservoir: &'a str,
    record: &'a SeasonalRecord,
    metrics: DerivedMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<&'a SeasonalRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    capacity_delta: Option<f64>,
}

pub fn run_record(
    period: &PeriodArgs,
    compare_year: Option<i32>,
    compare_season: Option<Season>,
) -> anyhow::Result<()> {
    let selected = select(period)?;
    let comparison = compare_year.and_then(|year| {
        find_record(
            &selected.series,
            year,
            compare_season.unwrap_or(period.season),
        )
    });
    let view = RecordView {
        reservoir: &selected.reservoir.name,
        record: &selected.record,
        metrics: DerivedMetrics::from_record(&selected.record, &selected.reservoir),
        comparison,
        capacity_delta: comparison
            .map(|c| capacity_delta(&selected.record, c, &selected.reservoir)),
    };
    print_json(&view)
}

pub fn run_polygon(period: &PeriodArgs) -> anyhow::Result<()> {
    let selected = select(period)?;
    let metrics = DerivedMetrics::from_record(&selected.record, &selected.reservoir);
    let ring = water_polygon(selected.reservoir.location, metrics.capacity_pct);
    print_json(&serde_json::json!({
        "reservoir": selected.reservoir.id,
        "center": selected.reservoir.location.or_fallback().as_pair(),
        "capacityPct": metrics.capacity_pct,
        "ring": ring,
    }))
}
