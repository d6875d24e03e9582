use anyhow::Result;
use tracing::info;

use days_without_incident::{config, monitoring, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load local .env if present (no-op in prod/systemd envs)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::from_env()?;
    monitoring::init_tracing(cfg.log_json);
    info!(?cfg, "boot");

    server::run(cfg).await
}
