use anyhow::Result;
use area_price_predictor::{config::Config, server};
use colored::Colorize;
use tracing::info;

/// Execute the start command
///
/// Runs the server in the foreground until SIGINT/SIGTERM.
pub async fn execute(cfg: Config) -> Result<()> {
    println!(
        "{} http://{}:{}",
        "Starting Area-Price Predictor on".green(),
        cfg.server.host,
        cfg.server.port
    );
    info!(model = %cfg.model.path.display(), "Starting Area-Price Predictor");

    server::start_server(cfg).await
}
