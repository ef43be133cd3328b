//! # StreamHub Config
//!
//! Configuration structures loaded once from environment variables at startup
//! and then shared read-only through the application state:
//!
//! - [`jwt`]: token secrets and expiry durations
//! - [`cookie`]: auth cookie attributes
//! - [`cors`]: allowed origins
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use streamhub_config::{CookieConfig, CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cookie_config = CookieConfig::from_env();
//! ```

pub mod cookie;
pub mod cors;
pub mod jwt;
pub mod server;

pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
