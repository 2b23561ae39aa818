//! HS256 bearer tokens.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AppError, CredentialError, Principal, TokenService};

const BEARER_PREFIX: &str = "Bearer ";

/// Default token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed tokens carrying the username.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Self {
        let key = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: &Principal) -> Result<String, AppError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            username: principal.username().to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CredentialError::TokenIssue(e.to_string()).into())
    }

    fn verify(&self, bearer: &str) -> Result<Principal, AppError> {
        let token = bearer
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AppError::TokenInvalid)?;

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "Token rejected");
            AppError::TokenInvalid
        })?;

        Ok(Principal::new(data.claims.username))
    }
}
