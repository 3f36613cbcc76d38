//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Employees known to the upstream directory.
    employee (id) {
        /// Primary key.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Organizations known to the upstream directory.
    organization (id) {
        /// Primary key.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        description -> Nullable<Text>,
        /// Legal form label (`IE`, `LLC`, `JSC`).
        #[sql_name = "type"]
        organization_type -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Responsibility links between employees and organizations.
    organization_responsible (organization_id, user_id) {
        organization_id -> Uuid,
        /// Responsible employee.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Every tender version, one row per `(tender_id, version)`.
    tender (row_id) {
        /// Surrogate key.
        row_id -> Int8,
        /// Business key shared by all versions.
        tender_id -> Uuid,
        name -> Varchar,
        description -> Varchar,
        service_type -> Varchar,
        status -> Varchar,
        /// Version number, unique per tender.
        version -> Int4,
        organization_id -> Uuid,
        creator_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Current bid versions.
    bid (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Varchar,
        status -> Varchar,
        tender_id -> Uuid,
        /// Tender version current when the bid was created.
        tender_version -> Int4,
        author_type -> Varchar,
        author_id -> Uuid,
        version -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Superseded bid versions.
    bid_history (bid_id, version) {
        bid_id -> Uuid,
        version -> Int4,
        name -> Varchar,
        description -> Varchar,
        status -> Varchar,
        tender_id -> Uuid,
        tender_version -> Int4,
        author_type -> Varchar,
        author_id -> Uuid,
        created_at -> Timestamptz,
        /// When the row was superseded.
        archived_at -> Timestamptz,
    }
}

diesel::table! {
    /// Feedback about bids.
    review (id) {
        id -> Uuid,
        bid_id -> Uuid,
        description -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(organization_responsible -> employee (user_id));
diesel::joinable!(organization_responsible -> organization (organization_id));
diesel::joinable!(review -> bid (bid_id));

diesel::allow_tables_to_appear_in_same_query!(
    employee,
    organization,
    organization_responsible,
    tender,
    bid,
    bid_history,
    review,
);
