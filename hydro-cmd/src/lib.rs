//! Command implementations for the HydroAI CLI.
//!
//! `inspect` commands work entirely on generated data; `remote` commands
//! talk to the optional HydroAI backend and fall back to local values when
//! it is unreachable.

use clap::{Args, Subcommand};
use hydro_core::backend::{BackendConfig, DEFAULT_BASE_URL};
use hydro_core::season::Season;
use std::time::Duration;

pub mod inspect;
pub mod remote;

/// Connection flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Base URL of the HydroAI backend
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub backend_url: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl BackendArgs {
    pub fn config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.backend_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Reservoir and period a command operates on.
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Reservoir id, e.g. res-redhills
    #[arg(short = 'r', long)]
    pub reservoir: String,

    /// Calendar year (2020-2024)
    #[arg(short = 'y', long)]
    pub year: i32,

    /// Winter, Summer, Monsoon or Post-Monsoon
    #[arg(short = 's', long)]
    pub season: Season,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the monitored reservoirs
    Reservoirs,

    /// Print the generated seasonal history of a reservoir as CSV
    History {
        /// Reservoir id, e.g. res-redhills
        #[arg(short = 'r', long)]
        reservoir: String,

        /// Write to this path instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Show derived metrics for one period, optionally against another
    Record {
        #[command(flatten)]
        period: PeriodArgs,

        /// Year to compare against
        #[arg(long)]
        compare_year: Option<i32>,

        /// Season to compare against (defaults to the primary season)
        #[arg(long)]
        compare_season: Option<Season>,
    },

    /// Print the approximate water-extent ring for one period as JSON
    Polygon {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Probe the backend health endpoint
    Status,

    /// Fetch satellite area, forecast and anomaly flag for one period
    Overlay {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Produce a risk report for one period (AI, or the local fallback)
    Report {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Trigger model retraining and follow the training metrics
    Retrain {
        /// Seconds after which training is assumed to have finished
        #[arg(long, default_value_t = 30)]
        assume_done_secs: u64,
    },

    /// Send an analyst correction of a reported risk level
    Feedback {
        /// Reservoir id, e.g. res-redhills
        #[arg(short = 'r', long)]
        reservoir: String,

        /// Risk level the report gave
        #[arg(long)]
        original: String,

        /// Risk level the analyst considers correct
        #[arg(long)]
        corrected: String,

        #[arg(long)]
        notes: Option<String>,
    },
}

pub async fn run(command: Command, backend: BackendArgs) -> anyhow::Result<()> {
    match command {
        Command::Reservoirs => inspect::run_reservoirs(),
        Command::History { reservoir, output } => {
            inspect::run_history(&reservoir, output.as_deref())
        }
        Command::Record {
            period,
            compare_year,
            compare_season,
        } => inspect::run_record(&period, compare_year, compare_season),
        Command::Polygon { period } => inspect::run_polygon(&period),
        Command::Status => remote::run_status(&backend.config()).await,
        Command::Overlay { period } => remote::run_overlay(&backend.config(), &period).await,
        Command::Report { period } => remote::run_report(&backend.config(), &period).await,
        Command::Retrain { assume_done_secs } => {
            remote::run_retrain(&backend.config(), Duration::from_secs(assume_done_secs)).await
        }
        Command::Feedback {
            reservoir,
            original,
            corrected,
            notes,
        } => remote::run_feedback(&backend.config(), &reservoir, original, corrected, notes).await,
    }
}
