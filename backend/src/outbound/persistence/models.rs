//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{bid, bid_history, employee, organization, review, tender};

/// Row struct for reading employees.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employee)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: Uuid,
    pub username: String,
}

/// Row struct for reading organizations.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organization)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tender models
// ---------------------------------------------------------------------------

/// One tender version as read from the `tender` table.
///
/// Also loaded through raw SQL for the current-version listings, hence
/// `QueryableByName`.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tender)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TenderRow {
    pub tender_id: Uuid,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub version: i32,
    pub organization_id: Uuid,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable tender version.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tender)]
pub(crate) struct NewTenderRow<'a> {
    pub tender_id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub service_type: &'a str,
    pub status: &'a str,
    pub version: i32,
    pub organization_id: Uuid,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Bid models
// ---------------------------------------------------------------------------

/// Current bid row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bid)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BidRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: Uuid,
    pub tender_version: i32,
    pub author_type: String,
    pub author_id: Uuid,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

/// Insertable current bid; also used as the full-row changeset on revision.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = bid)]
pub(crate) struct NewBidRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub tender_id: Uuid,
    pub tender_version: i32,
    pub author_type: &'a str,
    pub author_id: Uuid,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

/// Superseded bid row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bid_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BidHistoryRow {
    pub bid_id: Uuid,
    pub version: i32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub tender_id: Uuid,
    pub tender_version: i32,
    pub author_type: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable history row; `archived_at` uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bid_history)]
pub(crate) struct NewBidHistoryRow<'a> {
    pub bid_id: Uuid,
    pub version: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub tender_id: Uuid,
    pub tender_version: i32,
    pub author_type: &'a str,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<BidHistoryRow> for BidRow {
    fn from(row: BidHistoryRow) -> Self {
        Self {
            id: row.bid_id,
            name: row.name,
            description: row.description,
            status: row.status,
            tender_id: row.tender_id,
            tender_version: row.tender_version,
            author_type: row.author_type,
            author_id: row.author_id,
            version: row.version,
            created_at: row.created_at,
        }
    }
}

impl<'a> From<&NewBidRow<'a>> for NewBidHistoryRow<'a> {
    fn from(row: &NewBidRow<'a>) -> Self {
        Self {
            bid_id: row.id,
            version: row.version,
            name: row.name,
            description: row.description,
            status: row.status,
            tender_id: row.tender_id,
            tender_version: row.tender_version,
            author_type: row.author_type,
            author_id: row.author_id,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Review models
// ---------------------------------------------------------------------------

/// Review row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = review)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub bid_id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
