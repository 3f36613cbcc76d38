//! Shared embedded PostgreSQL cluster for the Diesel integration suites.
//!
//! `pg-embed-setup-unpriv` keeps one cluster alive for the whole test binary.
//! Bootstrapping downloads PostgreSQL on first use, so transient failures are
//! retried a few times before the suite gives up.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Return the process-wide cluster, bootstrapping it on first use.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(format!(
                        "shared cluster: attempt {attempt}/{SHARED_CLUSTER_RETRIES}: {error:?}"
                    ));
                }
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Pin `PG_PASSWORD` so a reused data directory keeps accepting logins.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster spawns threads; the shared handle
        // serialises bootstrap so this executes at most once per process.
        unsafe {
            std::env::set_var("PG_PASSWORD", "tenders_embedded_test");
        }
    }
}
