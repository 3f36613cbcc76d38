//! Procurement backend library: versioned tenders, bids and bid feedback.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the entities,
//! error taxonomy and lifecycle services; [`inbound`] adapts HTTP requests
//! onto the driving ports; [`outbound`] implements the driven ports over
//! PostgreSQL or memory.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
