//! Concrete database client implementations.
//!
//! Adapters implement the repository traits defined in the domain layer and
//! share the schema checks in [`schema`].

pub mod postgres;
pub mod schema;

pub use postgres::{PostgresClient, PostgresConfig};
