//! Shared helpers for the Diesel integration suites.
//!
//! Integration tests compile as separate crates, so suites pull these in with
//! `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{DirectoryRows, provision_template_database, seed_directory};

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// `postgres::Error`'s `Display` often collapses to `db error`, which hides
/// the cause in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
