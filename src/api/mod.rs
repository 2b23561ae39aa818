//! The API layer: request bodies, validation, handlers and routing.

pub mod handlers;
pub mod middleware;
pub mod payload;
pub mod router;
pub mod validation;

pub use router::create_router;
