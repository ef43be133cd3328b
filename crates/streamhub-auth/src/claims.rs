//! JWT claim structures.
//!
//! - [`AccessTokenClaims`]: short-lived, carries identity and role
//! - [`RefreshTokenClaims`]: long-lived, carries identity only

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Role at issue time. Authorization reads the stored role, not this one.
    pub role: String,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Unique token identifier
    pub jti: String,
}

/// Claims embedded in refresh tokens.
///
/// `jti` keeps two refresh tokens minted in the same second for the same
/// user distinct, which rotation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

/// Parses the `sub` claim as a user UUID.
pub trait Subject {
    fn sub(&self) -> &str;

    fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(self.sub()).ok()
    }
}

impl Subject for AccessTokenClaims {
    fn sub(&self) -> &str {
        &self.sub
    }
}

impl Subject for RefreshTokenClaims {
    fn sub(&self) -> &str {
        &self.sub
    }
}
