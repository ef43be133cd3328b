//! The credential store contract consumed by the session layer.

use async_trait::async_trait;
use streamhub_models::{AccountUpdate, NewUser, UserId, UserRecord, UserRole};

use crate::error::StoreError;

/// Typed access to user records.
///
/// Backends must keep `username` and `email` unique and report violations as
/// [`StoreError::Conflict`]. Read-then-write sequences built on top of this
/// trait are not atomic.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user whose username equals `username` or whose email equals
    /// `email`. Either key may be `None`; both are expected normalized.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Overwrites (or with `None`, clears) the stored refresh token.
    /// Returns `false` if no such user exists.
    async fn set_refresh_token(
        &self,
        id: UserId,
        refresh_token: Option<&str>,
    ) -> Result<bool, StoreError>;

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<bool, StoreError>;

    async fn update_account(
        &self,
        id: UserId,
        update: AccountUpdate,
    ) -> Result<Option<UserRecord>, StoreError>;

    async fn update_role(&self, id: UserId, role: UserRole) -> Result<bool, StoreError>;
}
