use crate::season::Season;
use serde::{Deserialize, Serialize};

/// One seasonal observation of a reservoir.
///
/// Records are generated rather than stored; see `hydro_data::generator`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalRecord {
    pub season: Season,
    pub year: i32,
    /// Water level in metres
    pub water_level: f64,
    /// Surface area in square kilometres
    pub surface_area: f64,
    /// Storage in MCM, within `[0, max_capacity]`
    pub volume: f64,
    /// Seasonal rainfall in millimetres, never negative
    pub rainfall: f64,
    /// Cloud cover percentage
    pub cloud_cover: f64,
}

impl SeasonalRecord {
    /// The `(year, season)` key this record belongs to.
    pub fn period(&self) -> (i32, Season) {
        (self.year, self.season)
    }
}
