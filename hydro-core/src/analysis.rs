//! Hydrological risk analysis as returned by the AI report service, plus the
//! local report used when that service cannot be reached.

use hydro_utils::numbers::{clamp_finite, round_half_up, safe_percentage};
use serde::{Deserialize, Serialize};

/// Overall risk, ordered by severity.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

/// Drought severity, ordered by severity.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DroughtSeverity {
    Normal,
    Mild,
    Severe,
    Extreme,
}

/// A hydrologist-style report for one reservoir at one period.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub summary: String,
    pub recommendation: String,
    pub forecast: String,
    /// Flood probability, 0 to 100
    pub flood_probability: f64,
    pub drought_severity: DroughtSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_anomaly: Option<bool>,
}

impl RiskLevel {
    /// Risk band for a capacity percentage.
    pub fn from_capacity_pct(pct: f64) -> RiskLevel {
        match pct {
            p if p < 50.0 => RiskLevel::Low,
            p if p < 80.0 => RiskLevel::Moderate,
            p if p < 95.0 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}

impl DroughtSeverity {
    /// Drought band for a capacity percentage.
    pub fn from_capacity_pct(pct: f64) -> DroughtSeverity {
        match pct {
            p if p < 20.0 => DroughtSeverity::Extreme,
            p if p < 35.0 => DroughtSeverity::Severe,
            p if p < 50.0 => DroughtSeverity::Mild,
            _ => DroughtSeverity::Normal,
        }
    }
}

impl AnalysisResult {
    /// Canned report built without the AI service.
    ///
    /// Bands are derived from the fill level only; the text makes it clear
    /// that no model was consulted.
    pub fn local_fallback(current_volume: f64, max_capacity: f64) -> AnalysisResult {
        let pct = clamp_finite(safe_percentage(current_volume, max_capacity), 0.0, 100.0);
        AnalysisResult {
            risk_level: RiskLevel::from_capacity_pct(pct),
            summary: format!(
                "Offline estimate: reservoir is at {:.1}% of capacity. AI analysis unavailable.",
                pct
            ),
            recommendation: "Manual check required.".to_string(),
            forecast: "AI Service Unavailable".to_string(),
            flood_probability: round_half_up(pct),
            drought_severity: DroughtSeverity::from_capacity_pct(pct),
            is_anomaly: None,
        }
    }
}
