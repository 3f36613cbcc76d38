//! Tenders entry-point: loads settings, prepares storage and serves the API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use tenders::config::AppSettings;
use tenders::inbound::http::health::HealthState;
use tenders::outbound::persistence::{DbPool, PoolConfig, run_pending_async};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid server address: {e}")))?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations {
            let applied = run_pending_async(database_url.to_owned())
                .await
                .map_err(std::io::Error::other)?;
            info!(applied = applied.len(), "database schema up to date");
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting tenders server");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
