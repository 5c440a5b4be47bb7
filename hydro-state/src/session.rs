//! Backend status and the cached AI analysis for the current selection.
//!
//! The analysis is only valid for the selection it was computed for; the
//! selection controller calls [`DashboardSession::invalidate_analysis`] on
//! every update.

use hydro_core::{
    analysis::AnalysisResult,
    backend::{AnalysisRequest, HydroBackend},
};
use log::{info, warn};
use serde::Serialize;

/// Whether the HydroAI backend answered the startup probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BackendStatus {
    /// Not probed yet
    #[default]
    Unknown,
    Online,
    /// Backend unreachable: local generated data only
    Simulation,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    status: BackendStatus,
    analysis: Option<AnalysisResult>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BackendStatus {
        self.status
    }

    pub fn is_online(&self) -> bool {
        self.status == BackendStatus::Online
    }

    pub fn set_status(&mut self, status: BackendStatus) {
        self.status = status;
    }

    /// Probe the backend health endpoint and record the outcome.
    pub async fn probe<B: HydroBackend + ?Sized>(&mut self, backend: &B) -> BackendStatus {
        self.status = match backend.health().await {
            Ok(health) => {
                info!("HydroAI backend online: {}", health.status);
                BackendStatus::Online
            }
            Err(e) => {
                warn!("HydroAI backend unreachable, running in simulation mode: {}", e);
                BackendStatus::Simulation
            }
        };
        self.status
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn store_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    /// Drop the cached analysis; it no longer matches the selection.
    pub fn invalidate_analysis(&mut self) {
        self.analysis = None;
    }

    /// Return the cached analysis, or ask the backend for one.
    ///
    /// A failed or skipped report call stores the local fallback instead.
    pub async fn request_analysis<B: HydroBackend + ?Sized>(
        &mut self,
        backend: &B,
        request: &AnalysisRequest,
    ) -> &AnalysisResult {
        let report = match self.analysis.take() {
            Some(cached) => cached,
            None => self.fetch_report(backend, request).await,
        };
        self.analysis.insert(report)
    }

    async fn fetch_report<B: HydroBackend + ?Sized>(
        &self,
        backend: &B,
        request: &AnalysisRequest,
    ) -> AnalysisResult {
        if self.status != BackendStatus::Simulation {
            match backend.generate_report(request).await {
                Ok(report) => return report,
                Err(e) => warn!("AI report failed for {}: {}", request.reservoir_name, e),
            }
        }
        info!("Using local risk summary for {}", request.reservoir_name);
        AnalysisResult::local_fallback(request.current_volume, request.max_capacity)
    }
}
