//! # StreamHub Models
//!
//! Domain models and DTOs shared by the API, the store backends, and the CLI.
//!
//! - [`auth`]: login request, token pair, login response
//! - [`ids`]: strongly-typed [`UserId`]
//! - [`users`]: stored identity, public projection, roles, account DTOs

pub mod auth;
pub mod ids;
pub mod users;

pub use auth::{LoginIdentifier, LoginRequest, LoginResponse, TokenPair};
pub use ids::UserId;
pub use users::{
    AccountUpdate, ChangePasswordDto, NewUser, PublicUser, RegisterUserDto, UpdateAccountDto,
    UserRecord, UserRole, normalize_email, normalize_username,
};
