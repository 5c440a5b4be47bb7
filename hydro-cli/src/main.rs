//! HydroAI CLI - seasonal reservoir history, derived metrics and risk reports.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "hydro-cli",
    version,
    about = "HydroAI reservoir monitoring toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: hydro_cmd::Command,

    #[command(flatten)]
    backend: hydro_cmd::BackendArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Backend at {}", cli.backend.backend_url);
    hydro_cmd::run(cli.command, cli.backend).await
}
