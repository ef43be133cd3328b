//! # StreamHub Auth
//!
//! Token issuing and verification for the StreamHub API.
//!
//! - [`claims`]: access and refresh token claim structures
//! - [`jwt`]: signing and verification
//! - [`error`]: [`TokenError`] and its mapping onto `AppError`
//!
//! Tokens are stateless here. Refresh token persistence, rotation, and
//! revocation live in the session layer of the API crate.

pub mod claims;
pub mod error;
pub mod jwt;

pub use claims::{AccessTokenClaims, RefreshTokenClaims, Subject};
pub use error::TokenError;
pub use jwt::{
    create_access_token, create_refresh_token, verify_access_token, verify_refresh_token,
    verify_token,
};
