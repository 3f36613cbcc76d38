//! Integration tests for `DieselBidRepository` against embedded PostgreSQL.
//!
//! The bid table keeps only the current row; these tests pin down how
//! revisions archive into `bid_history` and how a lost race rolls the archive
//! back.

use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tenders::domain::ports::{BidRepository, BidRepositoryError};
use tenders::domain::{Bid, BidAuthor, BidDraft, BidId, BidStatus, EmployeeId, TenderId};
use tenders::outbound::persistence::{DbPool, DieselBidRepository, PoolConfig};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

// Shared support includes directory seeding used only by the tender suite.
#[allow(dead_code)]
mod support;

use pg_embed::shared_cluster;
use support::embedded_postgres::bid_history_versions;
use support::{handle_cluster_setup_failure, provision_template_database};

// -----------------------------------------------------------------------------
// Test Context
// -----------------------------------------------------------------------------

struct TestContext {
    /// Tokio runtime reused for all async operations in this test.
    runtime: Runtime,
    repository: DieselBidRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn insert(&self, bid: &Bid) {
        self.runtime
            .block_on(self.repository.insert(bid))
            .expect("insert bid");
    }

    fn revise(&self, previous: &Bid, next: &Bid) -> Result<(), BidRepositoryError> {
        self.runtime
            .block_on(self.repository.record_revision(previous, next))
    }

    fn current(&self, bid_id: BidId) -> Option<Bid> {
        self.runtime
            .block_on(self.repository.find_current(bid_id))
            .expect("find current")
    }

    fn historical(&self, bid_id: BidId, version: u32) -> Option<Bid> {
        self.runtime
            .block_on(self.repository.find_historical_version(bid_id, version))
            .expect("find historical version")
    }

    fn archived_versions(&self, bid_id: BidId) -> Vec<i32> {
        bid_history_versions(&self.database_url, *bid_id.as_uuid()).expect("read bid_history")
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_template_database(cluster)?;
    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselBidRepository::new(pool),
        database_url,
        _database: temp_db,
    })
}

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn bid_at(id: BidId, version: u32) -> Bid {
    Bid::from(BidDraft {
        id,
        name: format!("Offer v{version}"),
        description: "Two hundred tonnes".to_owned(),
        status: BidStatus::Created,
        tender_id: TenderId::from_uuid(uuid::Uuid::from_u128(7)),
        tender_version: 1,
        author: BidAuthor::User(EmployeeId::from_uuid(uuid::Uuid::from_u128(9))),
        version,
        created_at: fixed_timestamp(),
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[rstest]
fn revisions_archive_the_previous_row(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: revisions_archive_the_previous_row skipped");
        return;
    };
    let first = bid_at(BidId::random(), 1);
    let second = bid_at(first.id(), 2);
    let third = second.with_status(BidStatus::Published);
    ctx.insert(&first);

    ctx.revise(&first, &second).expect("first revision");
    ctx.revise(&second, &third).expect("second revision");

    assert_eq!(ctx.current(first.id()), Some(third));
    assert_eq!(ctx.archived_versions(first.id()), [1, 2]);
}

#[rstest]
fn stale_revision_leaves_no_history_row(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: stale_revision_leaves_no_history_row skipped");
        return;
    };
    let first = bid_at(BidId::random(), 1);
    ctx.insert(&first);
    let phantom = bid_at(first.id(), 5);

    let error = ctx
        .revise(&phantom, &bid_at(first.id(), 6))
        .expect_err("current row is not at version 5");

    assert_eq!(error, BidRepositoryError::version_conflict(5_u32));
    assert!(ctx.archived_versions(first.id()).is_empty());
    assert_eq!(ctx.current(first.id()), Some(first));
}

#[rstest]
fn losing_writer_is_a_conflict(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: losing_writer_is_a_conflict skipped");
        return;
    };
    let first = bid_at(BidId::random(), 1);
    let winner = first.with_status(BidStatus::Published);
    let loser = first.with_status(BidStatus::Canceled);
    ctx.insert(&first);
    ctx.revise(&first, &winner).expect("winning revision");

    let error = ctx
        .revise(&first, &loser)
        .expect_err("based on a superseded version");

    assert_eq!(error, BidRepositoryError::version_conflict(1_u32));
    assert_eq!(ctx.archived_versions(first.id()), [1]);
    assert_eq!(ctx.current(first.id()), Some(winner));
}

#[rstest]
fn historical_lookup_falls_back_to_the_current_row(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: historical_lookup_falls_back_to_the_current_row skipped");
        return;
    };
    let first = bid_at(BidId::random(), 1);
    let second = bid_at(first.id(), 2);
    let third = bid_at(first.id(), 3);
    ctx.insert(&first);
    ctx.revise(&first, &second).expect("first revision");
    ctx.revise(&second, &third).expect("second revision");

    assert_eq!(ctx.historical(first.id(), 1), Some(first.clone()));
    assert_eq!(ctx.historical(first.id(), 2), Some(second));
    assert_eq!(ctx.historical(first.id(), 3), Some(third));
    assert_eq!(ctx.historical(first.id(), 4), None);
    assert_eq!(ctx.historical(BidId::random(), 1), None);
}
