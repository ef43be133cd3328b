//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use sqlx::PgPool;
use streamhub_models::{AccountUpdate, NewUser, UserId, UserRecord, UserRole};
use tracing::instrument;

use crate::error::StoreError;
use crate::repository::UserRepository;

const USER_COLUMNS: &str = "id, username, email, full_name, avatar, cover_image, password, \
                            role, refresh_token, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError> {
        if username.is_none() && email.is_none() {
            return Ok(None);
        }

        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE ($1::text IS NOT NULL AND username = $1) \
                OR ($2::text IS NOT NULL AND email = $2) \
             ORDER BY ($1::text IS NOT NULL AND username = $1) DESC, created_at \
             LIMIT 1"
        );

        sqlx::query_as::<_, UserRecord>(&query)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, UserRecord>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let query = format!(
            "INSERT INTO users (username, email, full_name, avatar, cover_image, password, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, UserRecord>(&query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.avatar)
            .bind(&user.cover_image)
            .bind(&user.password_hash)
            .bind(user.role)
            .fetch_one(&self.db)
            .await
            .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self, refresh_token))]
    async fn set_refresh_token(
        &self,
        id: UserId,
        refresh_token: Option<&str>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(refresh_token)
        .execute(&self.db)
        .await
        .map_err(StoreError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.db)
                .await
                .map_err(StoreError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn update_account(
        &self,
        id: UserId,
        update: AccountUpdate,
    ) -> Result<Option<UserRecord>, StoreError> {
        let query = format!(
            "UPDATE users SET full_name = $2, email = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, UserRecord>(&query)
            .bind(id)
            .bind(&update.full_name)
            .bind(&update.email)
            .fetch_optional(&self.db)
            .await
            .map_err(StoreError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn update_role(&self, id: UserId, role: UserRole) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(&self.db)
            .await
            .map_err(StoreError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
