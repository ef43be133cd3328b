//! User domain models and DTOs.
//!
//! [`UserRecord`] is the stored identity including credential fields. It is
//! deliberately not `Serialize`; anything sent to a client goes through
//! [`PublicUser`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use crate::ids::UserId;

/// Role of an identity. Stored as the Postgres enum `user_role`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Manager,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::User, UserRole::Manager, UserRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "manager" => Ok(UserRole::Manager),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

/// A stored identity, credential fields included.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: String,
    /// bcrypt hash
    pub password: String,
    pub role: UserRole,
    /// The single refresh token currently accepted for this identity.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}

/// Client-facing view of a user: the record minus `password` and `refresh_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for PublicUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            full_name: record.full_name,
            avatar: record.avatar,
            cover_image: record.cover_image,
            role: record.role,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Fields needed to insert a user. Username and email are expected normalized.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    pub full_name: String,
    pub email: String,
}

pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Usernames may not contain `@`, so a login identifier is never both a
/// username and some other account's email.
pub(crate) fn valid_username(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Username is required".into());
        return Err(err);
    }
    if value.contains('@') {
        let mut err = ValidationError::new("username_at_sign");
        err.message = Some("Username cannot contain '@'".into());
        return Err(err);
    }
    Ok(())
}

/// Registration request. Media URLs are optional; uploads happen elsewhere.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    #[validate(custom(function = "valid_username"))]
    pub username: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    #[validate(url(message = "Avatar must be a URL"))]
    pub avatar: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Cover image must be a URL"))]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountDto {
    #[validate(custom(function = "not_blank", message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Old password is required"))]
    #[serde(alias = "currentPassword")]
    pub old_password: String,
    #[validate(length(min = 8, message = "New password must be at least 8 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> UserRecord {
        UserRecord {
            id: UserId::new(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: "Alice Liddell".to_string(),
            avatar: String::new(),
            cover_image: String::new(),
            password: "$2b$04$hash".to_string(),
            role: UserRole::User,
            refresh_token: Some("rt".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("Admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(UserRole::Manager.to_string(), "manager");
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_public_user_excludes_credentials() {
        let public = PublicUser::from(sample_record());
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("refreshToken").is_none());
        assert_eq!(json["fullName"], "Alice Liddell");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_record_debug_redacts_secrets() {
        let debug = format!("{:?}", sample_record());
        assert!(!debug.contains("$2b$04$hash"));
        assert!(debug.contains("has_refresh_token: true"));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_username("  Alice "), "alice");
        assert_eq!(normalize_email("Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_register_dto_rejects_blank_username() {
        let dto = RegisterUserDto {
            username: "   ".to_string(),
            email: "alice@example.com".to_string(),
            full_name: "Alice".to_string(),
            password: "password123".to_string(),
            avatar: None,
            cover_image: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_register_dto_rejects_at_sign_in_username() {
        let dto = RegisterUserDto {
            username: "carol@example.com".to_string(),
            email: "carol2@example.com".to_string(),
            full_name: "Carol".to_string(),
            password: "password123".to_string(),
            avatar: None,
            cover_image: None,
        };
        let errors = dto.validate().unwrap_err();
        let field = errors.field_errors();
        assert_eq!(field["username"][0].code, "username_at_sign");
    }

    #[test]
    fn test_register_dto_valid() {
        let dto = RegisterUserDto {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: "Alice".to_string(),
            password: "password123".to_string(),
            avatar: Some("https://cdn.example.com/a.png".to_string()),
            cover_image: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_change_password_requires_old_password() {
        let dto = ChangePasswordDto {
            old_password: String::new(),
            new_password: "newpassword123".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = ChangePasswordDto {
            old_password: "old".to_string(),
            new_password: "short".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_change_password_accepts_current_password_alias() {
        let dto: ChangePasswordDto =
            serde_json::from_str(r#"{"currentPassword":"old","newPassword":"newpassword123"}"#)
                .unwrap();
        assert_eq!(dto.old_password, "old");
    }
}
