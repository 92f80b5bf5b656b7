use anyhow::Result;
use tracing::info;

use talentdesk::dashboard::{handlers, DashboardSession};
use talentdesk::telemetry::init_tracing;
use talentdesk::{AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    info!("Starting talentdesk v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::bootstrap(config)?;

    let board = state
        .blocking(|s| handlers::job_board(s, &DashboardSession::default()))
        .await?;
    for job in &board.jobs {
        info!(
            "{} [{}] {} ({}, {})",
            job.id,
            job.priority_rank(),
            job.title,
            job.location,
            job.employment
        );
    }

    Ok(())
}
