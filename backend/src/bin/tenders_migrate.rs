//! Apply the embedded schema migrations to a PostgreSQL database.

use std::env;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tenders::outbound::persistence::migrations::run_pending;

/// `tenders-migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tenders-migrate",
    about = "Apply pending tenders schema migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `TENDERS_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    explicit
        .or_else(|| env::var("TENDERS_DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("pass --database-url or set TENDERS_DATABASE_URL"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| eyre!("tracing init failed: {e}"))?;

    let args = CliArgs::parse();
    let database_url = resolve_database_url(args.database_url)?;
    let applied = run_pending(&database_url).wrap_err("failed to migrate the tenders schema")?;
    for name in &applied {
        tracing::info!(migration = %name, "applied");
    }
    Ok(())
}
