//! Database provisioning and raw-SQL helpers for the Diesel suites.
//!
//! - Each test gets a temporary database cloned from a template that already
//!   has the embedded migrations applied.
//! - Seeding and inspection go through `postgres` so they stay independent
//!   of the adapters under test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use tenders::domain::{EmployeeId, OrganizationId};
use tenders::outbound::persistence::migrations::run_pending;
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "tenders_template";
const TEMPLATE_PROVISION_RETRIES: usize = 5;
const TEMPLATE_PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash =
        hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the migrated template database unless it already exists.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_pending(&url).map_err(|err| err.to_string())?;
    }

    Ok(template_name)
}

/// Provision a temporary database cloned from the migration template.
pub fn provision_template_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let mut last_error = String::new();
    for attempt in 1..=TEMPLATE_PROVISION_RETRIES {
        let provisioned = ensure_template_database(cluster).and_then(|template_name| {
            cluster
                .temporary_database_from_template(
                    format!("test_{}", Uuid::new_v4()).as_str(),
                    template_name.as_str(),
                )
                .map_err(|err| format!("create database from template: {err:?}"))
        });
        match provisioned {
            Ok(database) => return Ok(database),
            Err(error) => {
                last_error = format!("attempt {attempt}/{TEMPLATE_PROVISION_RETRIES}: {error}");
            }
        }
        if attempt < TEMPLATE_PROVISION_RETRIES {
            std::thread::sleep(TEMPLATE_PROVISION_RETRY_DELAY);
        }
    }
    Err(last_error)
}

/// Identifiers of the directory rows inserted by [`seed_directory`].
#[derive(Debug, Clone, Copy)]
pub struct DirectoryRows {
    /// Employee `alice`.
    pub employee: EmployeeId,
    /// Organization `Acme`, run by `alice`.
    pub organization: OrganizationId,
}

/// Insert one employee responsible for one organization.
///
/// Tender rows reference both tables, so every tender suite seeds them first.
pub fn seed_directory(url: &str) -> Result<DirectoryRows, String> {
    let rows = DirectoryRows {
        employee: EmployeeId::random(),
        organization: OrganizationId::random(),
    };
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let mut transaction = client
        .transaction()
        .map_err(|err| format_postgres_error(&err))?;
    transaction
        .execute(
            "INSERT INTO employee (id, username) VALUES ($1, 'alice')",
            &[rows.employee.as_uuid()],
        )
        .map_err(|err| format_postgres_error(&err))?;
    transaction
        .execute(
            "INSERT INTO organization (id, name, type) VALUES ($1, 'Acme', 'LLC')",
            &[rows.organization.as_uuid()],
        )
        .map_err(|err| format_postgres_error(&err))?;
    transaction
        .execute(
            "INSERT INTO organization_responsible (organization_id, user_id) VALUES ($1, $2)",
            &[rows.organization.as_uuid(), rows.employee.as_uuid()],
        )
        .map_err(|err| format_postgres_error(&err))?;
    transaction
        .commit()
        .map_err(|err| format_postgres_error(&err))?;
    Ok(rows)
}

/// Archived versions of a bid, ascending.
pub fn bid_history_versions(url: &str, bid_id: Uuid) -> Result<Vec<i32>, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let rows = client
        .query(
            "SELECT version FROM bid_history WHERE bid_id = $1 ORDER BY version",
            &[&bid_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(rows.iter().map(|row| row.get::<_, i32>(0)).collect())
}
