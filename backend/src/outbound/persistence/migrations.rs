//! Embedded Diesel migrations for the procurement schema.
//!
//! Migrations run over a synchronous `PgConnection`, so the async entry point
//! moves the work onto the blocking thread pool.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled into the binary from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection to the database.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking task was cancelled or panicked.
    #[error("migration task aborted: {message}")]
    Aborted { message: String },
}

/// Apply every pending migration, returning the names of those applied.
///
/// # Errors
/// Returns [`MigrationError`] when the connection or any migration fails.
pub fn run_pending(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut connection =
        PgConnection::establish(database_url).map_err(|error| MigrationError::Connection {
            message: error.to_string(),
        })?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| MigrationError::Apply {
            message: error.to_string(),
        })?;
    let names: Vec<String> = applied.iter().map(ToString::to_string).collect();
    info!(count = names.len(), "applied pending migrations");
    Ok(names)
}

/// Async wrapper around [`run_pending`].
///
/// # Errors
/// Returns [`MigrationError`] when migrations fail or the task is aborted.
pub async fn run_pending_async(database_url: String) -> Result<Vec<String>, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending(&database_url))
        .await
        .map_err(|error| MigrationError::Aborted {
            message: error.to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn embedded_migrations_are_discoverable() {
        let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).expect("embedded");
        assert!(!migrations.is_empty());
    }

    #[rstest]
    fn unreachable_database_reports_connection_error() {
        let error = run_pending("postgres://invalid host/none").expect_err("bad url");
        assert!(matches!(error, MigrationError::Connection { .. }));
    }
}
