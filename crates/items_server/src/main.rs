//! Items service entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, open the database, serve HTTP.
//! - Halt before serving on any boot failure.

use anyhow::{anyhow, Context};
use items_api::{router, AppState};
use items_core::db::open_db;
use items_core::{init_logging, Config};
use log::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    if let Err(err) = serve(&config).await {
        error!("event=server_exit module=server status=error error={err:#}");
        return Err(err);
    }
    Ok(())
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let conn = open_db(&config.db)
        .with_context(|| format!("failed to open database `{}`", config.db))?;
    let app = router(AppState::new(conn));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind `{addr}`"))?;
    info!(
        "event=server_start module=server status=ok addr={addr} version={}",
        items_core::core_version()
    );

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;
    Ok(())
}
