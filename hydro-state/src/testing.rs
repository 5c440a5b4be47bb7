//! In-process stand-in for the HydroAI backend.

use hydro_core::{
    analysis::{AnalysisResult, DroughtSeverity, RiskLevel},
    backend::{
        AnalysisRequest, AnomalyVerdict, EpochMetric, Feedback, Forecast, HealthStatus,
        HydroBackend, RetrainAck, TrainingMetrics, WaterSpread,
    },
    coordinate::Coordinate,
    error::{HydroError, Result},
};
use std::sync::atomic::{AtomicU32, Ordering};

pub struct FakeBackend {
    online: bool,
    center: serde_json::Value,
    report_calls: AtomicU32,
    metrics_calls: AtomicU32,
}

impl FakeBackend {
    pub fn online() -> Self {
        Self {
            online: true,
            center: serde_json::json!([13.162, 80.181]),
            report_calls: AtomicU32::new(0),
            metrics_calls: AtomicU32::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            online: false,
            ..Self::online()
        }
    }

    pub fn with_center(center: serde_json::Value) -> Self {
        Self {
            center,
            ..Self::online()
        }
    }

    pub fn report_calls(&self) -> u32 {
        self.report_calls.load(Ordering::SeqCst)
    }

    pub fn metrics_calls(&self) -> u32 {
        self.metrics_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.online {
            Ok(())
        } else {
            Err(HydroError::Unavailable("connection refused".to_string()))
        }
    }
}

#[async_trait::async_trait]
impl HydroBackend for FakeBackend {
    async fn health(&self) -> Result<HealthStatus> {
        self.check()?;
        Ok(HealthStatus {
            status: "HydroAI Backend Online".to_string(),
            ml_status: Some("Active".to_string()),
        })
    }

    async fn water_spread(&self, _request: &AnalysisRequest) -> Result<WaterSpread> {
        self.check()?;
        Ok(WaterSpread {
            source: "Sentinel-2 L2A (Real-Time)".to_string(),
            surface_area_km2: 11.75,
            mean_ndwi: 0.45,
            polygon_center: self.center.clone(),
            is_simulation: false,
        })
    }

    async fn forecast(&self, historical_volumes: &[f64]) -> Result<Forecast> {
        self.check()?;
        Ok(Forecast {
            predicted_volume: historical_volumes.last().copied().unwrap_or(0.0) + 1.0,
            model: Some("LSTM (PyTorch)".to_string()),
        })
    }

    async fn anomaly(&self, _request: &AnalysisRequest) -> Result<AnomalyVerdict> {
        self.check()?;
        Ok(AnomalyVerdict {
            is_anomaly: true,
            model: Some("Isolation Forest".to_string()),
            error: None,
        })
    }

    async fn generate_report(&self, _request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(AnalysisResult {
            risk_level: RiskLevel::High,
            summary: "Storage is well above the seasonal norm.".to_string(),
            recommendation: "Continue monitoring inflow channels.".to_string(),
            forecast: "Based on NDWI trends, water levels are stable.".to_string(),
            flood_probability: 86.0,
            drought_severity: DroughtSeverity::Normal,
            is_anomaly: Some(false),
        })
    }

    async fn metrics(&self) -> Result<TrainingMetrics> {
        let calls = self.metrics_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.check()?;
        Ok(TrainingMetrics {
            history: (1..=calls)
                .map(|epoch| EpochMetric {
                    epoch,
                    loss: 1.0 / f64::from(epoch),
                    iou: 1.0 - 1.0 / f64::from(epoch + 1),
                })
                .collect(),
        })
    }

    async fn retrain(&self) -> Result<RetrainAck> {
        self.check()?;
        Ok(RetrainAck {
            status: "Retraining started".to_string(),
            message: Some("Check metrics endpoint for updates.".to_string()),
        })
    }

    async fn submit_feedback(&self, _feedback: &Feedback) -> Result<()> {
        self.check()
    }
}

pub fn sample_request() -> AnalysisRequest {
    AnalysisRequest {
        reservoir_name: "Red Hills (Puzhal)".to_string(),
        location: Coordinate::new(13.162, 80.181),
        date: "2024-08-15".to_string(),
        season: "Monsoon".to_string(),
        current_volume: 80.0,
        max_capacity: 93.0,
    }
}
