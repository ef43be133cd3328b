//! In-process [`UserRepository`] used when no database is configured, and by
//! the HTTP test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use streamhub_models::{AccountUpdate, NewUser, UserId, UserRecord, UserRole};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::repository::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn check_unique(
    users: &HashMap<UserId, UserRecord>,
    skip: Option<UserId>,
    username: Option<&str>,
    email: &str,
) -> Result<(), StoreError> {
    for user in users.values().filter(|u| Some(u.id) != skip) {
        if user.email == email {
            return Err(StoreError::Conflict("Email is already in use".into()));
        }
        if username.is_some_and(|name| user.username == name) {
            return Err(StoreError::Conflict("Username is already taken".into()));
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        let found = users
            .values()
            .filter(|u| {
                username.is_some_and(|name| u.username == name)
                    || email.is_some_and(|addr| u.email == addr)
            })
            .min_by_key(|u| {
                let exact_username = username.is_some_and(|name| u.username == name);
                (!exact_username, u.created_at)
            })
            .cloned();
        Ok(found)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;
        check_unique(&users, None, Some(&user.username), &user.email)?;

        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            cover_image: user.cover_image,
            password: user.password_hash,
            role: user.role,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn set_refresh_token(
        &self,
        id: UserId,
        refresh_token: Option<&str>,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.refresh_token = refresh_token.map(str::to_string);
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.password = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_account(
        &self,
        id: UserId,
        update: AccountUpdate,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&id) {
            return Ok(None);
        }
        check_unique(&users, Some(id), None, &update.email)?;

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        user.full_name = update.full_name;
        user.email = update.email;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn update_role(&self, id: UserId, role: UserRole) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
