//! Selection state for the dashboard.
//!
//! `SelectionController` owns the `SelectionState` together with the
//! `DashboardSession`. All mutations go through [`SelectionController::apply`],
//! which shallow-merges a `SelectionUpdate` and discards the cached analysis.

use crate::session::DashboardSession;
use hydro_core::season::Season;
use hydro_data::generator::{available_years, END_YEAR};
use serde::{Deserialize, Serialize};

/// Reservoir selected when the dashboard opens.
pub const DEFAULT_RESERVOIR_ID: &str = "res-redhills";

/// Currently selected reservoir, period and optional comparison period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub reservoir_id: String,
    pub year: i32,
    pub season: Season,
    pub compare_mode: bool,
    /// Kept while comparison is off so re-enabling restores it
    pub compare_year: Option<i32>,
    pub compare_season: Option<Season>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            reservoir_id: DEFAULT_RESERVOIR_ID.to_string(),
            year: END_YEAR,
            season: Season::Winter,
            compare_mode: false,
            compare_year: None,
            compare_season: None,
        }
    }
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionUpdate {
    pub reservoir_id: Option<String>,
    pub year: Option<i32>,
    pub season: Option<Season>,
    pub compare_mode: Option<bool>,
    pub compare_year: Option<i32>,
    pub compare_season: Option<Season>,
}

impl SelectionState {
    /// Shallow-merge `update` over this state.
    pub fn merge(&mut self, update: SelectionUpdate) {
        if let Some(reservoir_id) = update.reservoir_id {
            self.reservoir_id = reservoir_id;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(season) = update.season {
            self.season = season;
        }
        if let Some(compare_mode) = update.compare_mode {
            self.compare_mode = compare_mode;
        }
        if update.compare_year.is_some() {
            self.compare_year = update.compare_year;
        }
        if update.compare_season.is_some() {
            self.compare_season = update.compare_season;
        }
    }

    pub fn primary_period(&self) -> (i32, Season) {
        (self.year, self.season)
    }

    /// The comparison period, when comparison mode is on and seeded.
    pub fn comparison_period(&self) -> Option<(i32, Season)> {
        if !self.compare_mode {
            return None;
        }
        self.compare_year.zip(self.compare_season)
    }
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    state: SelectionState,
    session: DashboardSession,
    available_years: Vec<i32>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(SelectionState::default(), available_years())
    }
}

impl SelectionController {
    pub fn new(state: SelectionState, available_years: Vec<i32>) -> Self {
        Self {
            state,
            session: DashboardSession::new(),
            available_years,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DashboardSession {
        &mut self.session
    }

    pub fn available_years(&self) -> &[i32] {
        &self.available_years
    }

    /// Merge `update` into the selection and invalidate the cached analysis.
    pub fn apply(&mut self, update: SelectionUpdate) -> &SelectionState {
        self.state.merge(update);
        self.session.invalidate_analysis();
        &self.state
    }

    /// Flip comparison mode.
    ///
    /// Turning it on seeds an unset comparison period with the previous
    /// year (never before the earliest available year) and the primary
    /// season. Turning it off keeps the stored comparison period.
    pub fn toggle_comparison(&mut self) -> &SelectionState {
        let update = if self.state.compare_mode {
            SelectionUpdate {
                compare_mode: Some(false),
                ..SelectionUpdate::default()
            }
        } else {
            let earliest = self
                .available_years
                .iter()
                .min()
                .copied()
                .unwrap_or(self.state.year);
            SelectionUpdate {
                compare_mode: Some(true),
                compare_year: Some(
                    self.state
                        .compare_year
                        .unwrap_or_else(|| earliest.max(self.state.year - 1)),
                ),
                compare_season: Some(self.state.compare_season.unwrap_or(self.state.season)),
                ..SelectionUpdate::default()
            }
        };
        self.apply(update)
    }
}
