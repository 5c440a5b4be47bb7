use crate::{
    coordinate::{Coordinate, FALLBACK_COORDINATE},
    error::{HydroError, Result},
};
use csv::ReaderBuilder;
use log::warn;
use serde::{Deserialize, Serialize};

/// Embedded CSV reference list of monitored reservoirs.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/reservoirs.csv");

/// Capacity used for an unknown reservoir, in MCM.
pub const DEFAULT_MAX_CAPACITY: f64 = 100.0;

/// Full reservoir level used for an unknown reservoir, in metres.
pub const DEFAULT_FULL_LEVEL: f64 = 20.0;

/// A monitored reservoir and its static design parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Reservoir {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    /// Maximum storage in million cubic metres (MCM)
    pub max_capacity: f64,
    /// Full reservoir level (FRL) in metres
    pub full_level: f64,
    /// Catchment area in square kilometres
    pub catchment_area: f64,
    /// Year the dam or tank was built
    pub built: i32,
    pub description: String,
}

fn parse_float(ess: &str) -> f64 {
    match ess.trim().to_lowercase().as_str() {
        "" | "null" | "n/a" | "na" => 0.0,
        s => s.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
    }
}

fn parse_int(ess: &str) -> i32 {
    match ess.trim().to_lowercase().as_str() {
        "" | "null" | "n/a" | "na" => 0,
        s => s.parse::<i32>().unwrap_or_default(),
    }
}

impl Reservoir {
    /// Get the reservoir vector from the embedded CSV.
    pub fn get_reservoir_vector() -> Result<Vec<Reservoir>> {
        Reservoir::parse_reservoir_csv(CSV_OBJECT)
    }

    /// Parse a CSV string of reservoir data into a vector of Reservoirs.
    ///
    /// Expected CSV columns:
    /// id, name, lat, lng, max_capacity, full_level, catchment_area, built, description
    ///
    /// Unparseable numeric cells become 0; a missing id or name is an error.
    pub fn parse_reservoir_csv(csv_object: &str) -> Result<Vec<Reservoir>> {
        let mut reservoir_list: Vec<Reservoir> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for (row, record) in rdr.records().enumerate() {
            let rho = record?;
            let id = rho
                .get(0)
                .filter(|s| !s.trim().is_empty())
                .ok_or(HydroError::MissingColumn { column: "id", row })?;
            let name = rho
                .get(1)
                .ok_or(HydroError::MissingColumn { column: "name", row })?;
            let cell = |i: usize| rho.get(i).unwrap_or("");
            reservoir_list.push(Reservoir {
                id: id.trim().to_string(),
                name: name.trim().to_string(),
                location: Coordinate::new(parse_float(cell(2)), parse_float(cell(3))),
                max_capacity: parse_float(cell(4)),
                full_level: parse_float(cell(5)),
                catchment_area: parse_float(cell(6)),
                built: parse_int(cell(7)),
                description: cell(8).trim().to_string(),
            });
        }
        Ok(reservoir_list)
    }

    /// Look up a reservoir by id.
    pub fn find<'a>(reservoirs: &'a [Reservoir], id: &str) -> Option<&'a Reservoir> {
        reservoirs.iter().find(|r| r.id == id)
    }

    /// Stand-in for an unknown id, built from the default constants.
    pub fn placeholder(id: &str) -> Reservoir {
        Reservoir {
            id: id.to_string(),
            name: id.to_string(),
            location: FALLBACK_COORDINATE,
            max_capacity: DEFAULT_MAX_CAPACITY,
            full_level: DEFAULT_FULL_LEVEL,
            catchment_area: 0.0,
            built: 0,
            description: String::new(),
        }
    }

    /// The reservoir with `id`, or a [`Reservoir::placeholder`] when unknown.
    pub fn find_or_placeholder(reservoirs: &[Reservoir], id: &str) -> Reservoir {
        match Reservoir::find(reservoirs, id) {
            Some(reservoir) => reservoir.clone(),
            None => {
                warn!("Unknown reservoir {}, using default parameters", id);
                Reservoir::placeholder(id)
            }
        }
    }
}
