//! Outbound adapters implementing the driven procurement ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local store used when no database is configured
//!   and by the integration tests
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
