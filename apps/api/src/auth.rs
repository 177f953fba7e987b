//! Session token module.
//!
//! Login issues an HS256 session token. Account routes accept it as an
//! `Authorization: Bearer` header; when present, its subject must match the
//! `:userId` path segment.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Token type stamped into every session token.
const SESSION_TOKEN_TYPE: &str = "session";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    /// Account username at login time
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    /// Token type ("session")
    pub token_type: String,
}

/// JWT token manager.
pub struct JwtManager {
    secret: String,
    session_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: String, session_lifetime_secs: i64) -> Self {
        JwtManager {
            secret,
            session_lifetime_secs,
        }
    }

    /// Generate a session token for an account.
    pub fn generate_session_token(&self, account_id: &str, username: &str) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.session_lifetime_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ApiError::internal("Session lifetime out of range"))?;

        let claims = Claims {
            sub: account_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a session token.
    pub fn validate_session_token(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        if token_data.claims.token_type != SESSION_TOKEN_TYPE {
            return Err(ApiError::unauthorized("Expected session token"));
        }

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// =============================================================================
// Session Extractor
// =============================================================================

/// The caller's session, if a bearer token was sent.
///
/// ## Usage
/// ```rust,ignore
/// async fn list_products(
///     State(state): State<AppState>,
///     session: Session,
///     Path(user_id): Path<String>,
/// ) -> Result<Json<Vec<Product>>, ApiError> {
///     session.authorize(&user_id)?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    claims: Option<Claims>,
    required: bool,
}

impl Session {
    /// Checks that the caller may act on `account_id`.
    ///
    /// ## Rules
    /// - Token present: its subject must be `account_id` (else 403)
    /// - No token: allowed unless `require_auth` is set (else 401)
    pub fn authorize(&self, account_id: &str) -> Result<(), ApiError> {
        match &self.claims {
            Some(claims) if claims.sub == account_id => Ok(()),
            Some(claims) => {
                debug!(token_sub = %claims.sub, account_id = %account_id, "Token does not match account");
                Err(ApiError::forbidden("Token does not grant access to this account"))
            }
            None if self.required => Err(ApiError::unauthorized("Missing bearer token")),
            None => Ok(()),
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let required = state.config.require_auth;

        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Session {
                claims: None,
                required,
            });
        };

        let token = header
            .to_str()
            .ok()
            .and_then(extract_bearer_token)
            .ok_or_else(|| ApiError::unauthorized("Expected 'Authorization: Bearer <token>'"))?;

        let claims = state.jwt.validate_session_token(token)?;

        Ok(Session {
            claims: Some(claims),
            required,
        })
    }
}
