//! Commands that talk to the HydroAI backend.
//!
//! Every command probes first; an unreachable backend switches to the local
//! values instead of failing, except for retrain and feedback which have no
//! local counterpart.

use crate::{
    inspect::{print_json, select},
    PeriodArgs,
};
use hydro_core::{
    backend::{AnalysisRequest, BackendConfig, Feedback, HydroBackend},
    client::HttpBackend,
    reservoir::Reservoir,
};
use hydro_state::{
    display::{drought_descriptor, risk_descriptor, status_descriptor},
    overlay::{local_overlay, resolve_overlay},
    session::{BackendStatus, DashboardSession},
    state::{SelectionController, SelectionState, SelectionUpdate},
    training::{TrainingPhase, TrainingWatch, METRICS_POLL_INTERVAL},
};
use hydro_data::generator::available_years;
use log::{info, warn};
use std::{sync::Arc, time::Duration};

pub async fn run_status(config: &BackendConfig) -> anyhow::Result<()> {
    let backend = HttpBackend::new(config.clone())?;
    let mut session = DashboardSession::new();
    let status = session.probe(&backend).await;
    let descriptor = status_descriptor(status);
    println!("{} {:?} ({})", config.base_url, status, descriptor.icon);
    Ok(())
}

pub async fn run_overlay(config: &BackendConfig, period: &PeriodArgs) -> anyhow::Result<()> {
    let selected = select(period)?;
    let backend = HttpBackend::new(config.clone())?;
    let mut session = DashboardSession::new();
    let overlay = match session.probe(&backend).await {
        BackendStatus::Online => {
            resolve_overlay(&backend, &selected.reservoir, &selected.series, &selected.record).await
        }
        _ => local_overlay(&selected.reservoir, &selected.record),
    };
    print_json(&overlay)
}

pub async fn run_report(config: &BackendConfig, period: &PeriodArgs) -> anyhow::Result<()> {
    let selected = select(period)?;
    let backend = HttpBackend::new(config.clone())?;

    let mut controller = SelectionController::new(SelectionState::default(), available_years());
    controller.apply(SelectionUpdate {
        reservoir_id: Some(period.reservoir.clone()),
        year: Some(period.year),
        season: Some(period.season),
        ..SelectionUpdate::default()
    });
    controller.session_mut().probe(&backend).await;

    let request = AnalysisRequest::for_record(&selected.reservoir, &selected.record);
    let report = controller
        .session_mut()
        .request_analysis(&backend, &request)
        .await
        .clone();
    print_json(&serde_json::json!({
        "reservoir": selected.reservoir.name,
        "status": controller.session().status(),
        "report": report,
        "riskDisplay": risk_descriptor(report.risk_level),
        "droughtDisplay": drought_descriptor(report.drought_severity),
    }))
}

pub async fn run_retrain(config: &BackendConfig, assume_done_after: Duration) -> anyhow::Result<()> {
    let backend = Arc::new(HttpBackend::new(config.clone())?);
    let ack = backend.retrain().await?;
    info!(
        "Retrain accepted: {} {}",
        ack.status,
        ack.message.as_deref().unwrap_or_default()
    );

    let training = TrainingWatch::spawn_with(backend, METRICS_POLL_INTERVAL, assume_done_after);
    let mut progress = training.subscribe();
    loop {
        tokio::select! {
            changed = progress.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = progress.borrow_and_update().clone();
                if let Some(latest) = current.metrics.latest() {
                    println!(
                        "poll {:>3}  epoch {:>3}  loss {:.4}  IoU {:.4}",
                        current.polls, latest.epoch, latest.loss, latest.iou
                    );
                }
                if current.phase == TrainingPhase::AssumedComplete {
                    println!("Training assumed complete after {:?}", assume_done_after);
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, no longer following training");
                break;
            }
        }
    }
    training.cancel();
    Ok(())
}

pub async fn run_feedback(
    config: &BackendConfig,
    reservoir_id: &str,
    original: String,
    corrected: String,
    notes: Option<String>,
) -> anyhow::Result<()> {
    let reservoirs = Reservoir::get_reservoir_vector()?;
    let reservoir = Reservoir::find_or_placeholder(&reservoirs, reservoir_id);
    let backend = HttpBackend::new(config.clone())?;
    backend
        .submit_feedback(&Feedback {
            reservoir_name: reservoir.name,
            original_risk: original,
            corrected_risk: corrected,
            notes,
        })
        .await?;
    info!("Feedback recorded for {}", reservoir_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_core::season::Season;

    fn unreachable() -> BackendConfig {
        BackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    fn period() -> PeriodArgs {
        PeriodArgs {
            reservoir: "res-redhills".to_string(),
            year: 2023,
            season: Season::Monsoon,
        }
    }

    #[tokio::test]
    async fn test_status_without_backend() {
        assert!(run_status(&unreachable()).await.is_ok());
    }

    #[tokio::test]
    async fn test_report_and_overlay_fall_back_locally() {
        assert!(run_report(&unreachable(), &period()).await.is_ok());
        assert!(run_overlay(&unreachable(), &period()).await.is_ok());
    }

    #[tokio::test]
    async fn test_feedback_needs_backend() {
        let result = run_feedback(
            &unreachable(),
            "res-redhills",
            "Low".to_string(),
            "High".to_string(),
            None,
        )
        .await;
        assert!(result.is_err());
    }
}
