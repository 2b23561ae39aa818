//! Password hashing and bearer-token adapters.

pub mod password;
pub mod token;

pub use password::Argon2PasswordHasher;
pub use token::{DEFAULT_TOKEN_TTL_SECS, JwtTokenService};
