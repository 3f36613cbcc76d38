//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the driven procurement
//! ports backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to the port
//!   error types; unique violations become version conflicts where the
//!   versioning contract needs them.
//!
//! # Example
//!
//! ```ignore
//! use tenders::outbound::persistence::{DbPool, DieselTenderRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tenders")).await?;
//! let tenders = DieselTenderRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_bid_repository;
mod diesel_identity_repository;
mod diesel_review_repository;
mod diesel_tender_repository;
pub mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bid_repository::DieselBidRepository;
pub use diesel_identity_repository::DieselIdentityRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_tender_repository::DieselTenderRepository;
pub use migrations::{MigrationError, run_pending_async};
pub use pool::{DbPool, PoolConfig, PoolError};
