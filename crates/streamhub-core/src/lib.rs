//! # StreamHub Core
//!
//! Foundational types shared by every StreamHub crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`response`]: JSON success envelope
//!
//! # Example
//!
//! ```ignore
//! use streamhub_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! if !verify_password("secure_password", &hash)? {
//!     return Err(AppError::invalid_credentials("Invalid credentials"));
//! }
//! ```

pub mod errors;
pub mod password;
pub mod response;

pub use errors::{AppError, ErrorKind};
pub use password::{hash_password, hash_password_with_cost, verify_password};
pub use response::ApiResponse;
