//! JWT signing configuration.
//!
//! Access and refresh tokens are signed with separate secrets and expire on
//! separate schedules, so a refresh token can never pass as an access token.
//!
//! # Environment Variables
//!
//! - `ACCESS_TOKEN_SECRET`: HMAC secret for access tokens
//! - `REFRESH_TOKEN_SECRET`: HMAC secret for refresh tokens
//! - `ACCESS_TOKEN_EXPIRY`: access token lifetime in seconds (default: 3600)
//! - `REFRESH_TOKEN_EXPIRY`: refresh token lifetime in seconds (default: 864000)

use std::env;

const DEFAULT_ACCESS_SECRET: &str = "dev-access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "dev-refresh-secret-change-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_token_secret: env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or_else(|_| DEFAULT_ACCESS_SECRET.to_string()),
            refresh_token_secret: env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or_else(|_| DEFAULT_REFRESH_SECRET.to_string()),
            access_token_expiry: env::var("ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_token_expiry: env::var("REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(864000), // 10 days
        }
    }

    /// True when either secret is still the built-in development value.
    pub fn uses_default_secrets(&self) -> bool {
        self.access_token_secret == DEFAULT_ACCESS_SECRET
            || self.refresh_token_secret == DEFAULT_REFRESH_SECRET
    }
}
