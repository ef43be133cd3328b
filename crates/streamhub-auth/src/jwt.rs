//! Token issuing and verification.
//!
//! Both token kinds are HS256 JWTs. Access tokens are signed with
//! `access_token_secret`, refresh tokens with `refresh_token_secret`; each has
//! its own expiry. Verification is all-or-nothing: a token either yields its
//! full claims or a [`TokenError`].
//!
//! # Example
//!
//! ```ignore
//! use streamhub_auth::{create_access_token, verify_access_token};
//! use streamhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "alice", "alice@example.com", "user", &config)?;
//! let claims = verify_access_token(&token, &config)?;
//! assert_eq!(claims.username, "alice");
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use streamhub_config::JwtConfig;

use crate::claims::{AccessTokenClaims, RefreshTokenClaims};
use crate::error::TokenError;

/// Returns `(iat, exp)` for a token living `lifetime_secs` from now.
fn issue_window(lifetime_secs: i64) -> (usize, usize) {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(lifetime_secs).max(0);
    (now.max(0) as usize, exp as usize)
}

fn sign<C: Serialize>(claims: &C, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

/// Mints an access token bound to a user and the role they hold now.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    email: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let (iat, exp) = issue_window(jwt_config.access_token_expiry);

    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
    };

    sign(&claims, &jwt_config.access_token_secret)
}

/// Mints a refresh token. The caller is responsible for persisting it.
pub fn create_refresh_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    let (iat, exp) = issue_window(jwt_config.refresh_token_expiry);

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
    };

    sign(&claims, &jwt_config.refresh_token_secret)
}

/// Checks signature and expiry against `secret` and decodes the claims.
///
/// # Errors
///
/// - [`TokenError::Expired`] when the signature is valid but `exp` has passed
/// - [`TokenError::InvalidSignature`] when the token was signed with another secret
/// - [`TokenError::Malformed`] when the token or its claims cannot be decoded
pub fn verify_token<C: DeserializeOwned>(token: &str, secret: &str) -> Result<C, TokenError> {
    decode::<C>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(TokenError::from)
}

pub fn verify_access_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<AccessTokenClaims, TokenError> {
    verify_token(token, &jwt_config.access_token_secret)
}

pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, TokenError> {
    verify_token(token, &jwt_config.refresh_token_secret)
}
