//! Application layer containing business logic, configuration and shared state.

pub mod config;
pub mod service;
pub mod state;

pub use config::AppConfig;
pub use service::BlogService;
pub use state::AppState;
