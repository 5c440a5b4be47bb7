//! Icon and colour class for every severity and status the dashboard shows.
//!
//! Front ends look values up here instead of branching on label strings.

use crate::session::BackendStatus;
use hydro_core::analysis::{DroughtSeverity, RiskLevel};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayDescriptor {
    pub icon: &'static str,
    pub color_class: &'static str,
}

const fn descriptor(icon: &'static str, color_class: &'static str) -> DisplayDescriptor {
    DisplayDescriptor { icon, color_class }
}

pub fn risk_descriptor(level: RiskLevel) -> DisplayDescriptor {
    match level {
        RiskLevel::Low => descriptor("shield-check", "text-emerald-600 bg-emerald-50"),
        RiskLevel::Moderate => descriptor("info", "text-amber-600 bg-amber-50"),
        RiskLevel::High => descriptor("alert-triangle", "text-orange-600 bg-orange-50"),
        RiskLevel::Critical => descriptor("siren", "text-red-700 bg-red-50"),
    }
}

pub fn drought_descriptor(severity: DroughtSeverity) -> DisplayDescriptor {
    match severity {
        DroughtSeverity::Normal => descriptor("droplets", "text-sky-600 bg-sky-50"),
        DroughtSeverity::Mild => descriptor("sun", "text-yellow-600 bg-yellow-50"),
        DroughtSeverity::Severe => descriptor("thermometer-sun", "text-orange-700 bg-orange-50"),
        DroughtSeverity::Extreme => descriptor("flame", "text-red-700 bg-red-50"),
    }
}

pub fn status_descriptor(status: BackendStatus) -> DisplayDescriptor {
    match status {
        BackendStatus::Unknown => descriptor("loader", "text-slate-500"),
        BackendStatus::Online => descriptor("wifi", "text-emerald-600"),
        BackendStatus::Simulation => descriptor("wifi-off", "text-slate-500"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_risk_level_is_distinct() {
        let levels = [
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::Critical,
        ];
        let icons: HashSet<_> = levels.iter().map(|l| risk_descriptor(*l).icon).collect();
        assert_eq!(icons.len(), levels.len());
    }

    #[test]
    fn test_every_drought_severity_is_distinct() {
        let severities = [
            DroughtSeverity::Normal,
            DroughtSeverity::Mild,
            DroughtSeverity::Severe,
            DroughtSeverity::Extreme,
        ];
        let icons: HashSet<_> = severities
            .iter()
            .map(|s| drought_descriptor(*s).icon)
            .collect();
        assert_eq!(icons.len(), severities.len());
    }

    #[test]
    fn test_status_descriptor() {
        assert_eq!(status_descriptor(BackendStatus::Simulation).icon, "wifi-off");
    }
}
