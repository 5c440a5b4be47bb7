//! Contract of the optional HydroAI backend (satellite water spread, ML
//! forecast and anomaly detection, AI report, training metrics).
//!
//! Everything here is best-effort: callers treat any error as absence of the
//! optional fact and fall back to locally generated values.

use crate::{
    analysis::AnalysisResult, coordinate::Coordinate, error::Result, record::SeasonalRecord,
    reservoir::Reservoir,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of trailing volumes sent to the forecast model.
pub const FORECAST_WINDOW: usize = 12;

/// Connection settings for [`HydroBackend`] implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BackendConfig {
    /// Join `path` onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Request body shared by the satellite, anomaly and report endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub reservoir_name: String,
    pub location: Coordinate,
    /// `YYYY-MM-DD`
    pub date: String,
    pub season: String,
    pub current_volume: f64,
    pub max_capacity: f64,
}

impl AnalysisRequest {
    /// Request describing `record` of `reservoir`, dated at the season's
    /// representative day.
    pub fn for_record(reservoir: &Reservoir, record: &SeasonalRecord) -> Self {
        Self {
            reservoir_name: reservoir.name.clone(),
            location: reservoir.location.or_fallback(),
            date: hydro_utils::dates::format_date(
                &record.season.representative_date(record.year),
            ),
            season: record.season.label().to_string(),
            current_volume: record.volume,
            max_capacity: reservoir.max_capacity,
        }
    }
}

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ml_status: Option<String>,
}

/// Observed water spread for a location and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSpread {
    pub source: String,
    pub surface_area_km2: f64,
    pub mean_ndwi: f64,
    /// Untyped so a malformed center can be rejected by the validator.
    #[serde(default)]
    pub polygon_center: serde_json::Value,
    pub is_simulation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub historical_volumes: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predicted_volume: f64,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyVerdict {
    pub is_anomaly: bool,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Per-epoch training figures for the water segmentation model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetric {
    pub epoch: u32,
    pub loss: f64,
    pub iou: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    #[serde(default)]
    pub history: Vec<EpochMetric>,
}

impl TrainingMetrics {
    pub fn latest(&self) -> Option<&EpochMetric> {
        self.history.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrainAck {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Analyst correction of a reported risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub reservoir_name: String,
    pub original_risk: String,
    pub corrected_risk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Operations offered by the HydroAI backend.
#[async_trait::async_trait]
pub trait HydroBackend: Send + Sync {
    async fn health(&self) -> Result<HealthStatus>;

    async fn water_spread(&self, request: &AnalysisRequest) -> Result<WaterSpread>;

    async fn forecast(&self, historical_volumes: &[f64]) -> Result<Forecast>;

    async fn anomaly(&self, request: &AnalysisRequest) -> Result<AnomalyVerdict>;

    async fn generate_report(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;

    async fn metrics(&self) -> Result<TrainingMetrics>;

    async fn retrain(&self) -> Result<RetrainAck>;

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<()>;
}

/// Trailing [`FORECAST_WINDOW`] volumes of a series, oldest first.
pub fn forecast_window(volumes: &[f64]) -> &[f64] {
    let start = volumes.len().saturating_sub(FORECAST_WINDOW);
    &volumes[start..]
}
