//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod messages;
pub mod patterns;
pub mod traits;
pub mod types;

pub use error::{
    AppError, ConfigError, CredentialError, DatabaseError, USERNAME_UNIQUE_CONSTRAINT,
    ValidationErrors,
};
pub use messages::{ErrorMessage, ResponseMessage};
pub use patterns::Pattern;
pub use traits::{DatabaseClient, PasswordHasher, PostRepository, TokenService, UserRepository};
pub use types::{
    Credentials, ENTITY_ID_LENGTH, EntityId, ErrorsResponse, FieldError, HealthResponse,
    HealthStatus, MessageResponse, NewPost, NewUser, Post, PostUpdate, Principal, Registration,
    TokenResponse, User, generate_entity_id,
};
