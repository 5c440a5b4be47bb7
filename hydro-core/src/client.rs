//! `reqwest` implementation of [`HydroBackend`].

use crate::{
    analysis::AnalysisResult,
    backend::{
        forecast_window, AnalysisRequest, AnomalyVerdict, BackendConfig, Feedback, Forecast,
        ForecastRequest, HealthStatus, HydroBackend, RetrainAck, TrainingMetrics, WaterSpread,
    },
    error::{HydroError, Result},
};
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};

/// HTTP client for a HydroAI backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!("Backend {} answered {}", path, status);
            return Err(HydroError::BadStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(path, response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::read_json(path, response).await
    }
}

#[async_trait::async_trait]
impl HydroBackend for HttpBackend {
    async fn health(&self) -> Result<HealthStatus> {
        self.get("/").await
    }

    async fn water_spread(&self, request: &AnalysisRequest) -> Result<WaterSpread> {
        self.post("/api/satellite/water-spread", request).await
    }

    async fn forecast(&self, historical_volumes: &[f64]) -> Result<Forecast> {
        let body = ForecastRequest {
            historical_volumes: forecast_window(historical_volumes).to_vec(),
        };
        self.post("/api/ml/forecast", &body).await
    }

    async fn anomaly(&self, request: &AnalysisRequest) -> Result<AnomalyVerdict> {
        self.post("/api/ml/anomaly", request).await
    }

    async fn generate_report(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.post("/api/ai/generate-report", request).await
    }

    async fn metrics(&self) -> Result<TrainingMetrics> {
        self.get("/api/ml/metrics").await
    }

    async fn retrain(&self) -> Result<RetrainAck> {
        self.post("/api/ml/retrain", &serde_json::json!({})).await
    }

    async fn submit_feedback(&self, feedback: &Feedback) -> Result<()> {
        let _ack: serde_json::Value = self.post("/api/feedback", feedback).await?;
        Ok(())
    }
}
