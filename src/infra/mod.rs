//! Infrastructure layer implementations.

pub mod credentials;
pub mod database;
pub mod observability;

pub use credentials::{Argon2PasswordHasher, DEFAULT_TOKEN_TTL_SECS, JwtTokenService};
pub use database::{PostgresClient, PostgresConfig};
pub use observability::{LogFormat, PrometheusHandle, init_metrics, init_metrics_handle, init_tracing};
