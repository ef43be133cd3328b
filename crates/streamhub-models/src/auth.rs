//! Authentication request and response DTOs.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::users::{PublicUser, normalize_email, normalize_username};

/// Login with a username or an email, plus a password.
///
/// Accepts `username`, `email`, or the combined `usernameOrEmail` field.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_login_identifier"))]
pub struct LoginRequest {
    #[serde(default, alias = "usernameOrEmail")]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn validate_login_identifier(request: &LoginRequest) -> Result<(), ValidationError> {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());

    if !present(&request.username) && !present(&request.email) {
        let mut err = ValidationError::new("identifier_required");
        err.message = Some("Username or email is required".into());
        return Err(err);
    }
    Ok(())
}

/// Normalized lookup keys derived from a [`LoginRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginIdentifier {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl LoginRequest {
    /// A `username` value containing `@` is also tried as an email.
    pub fn identifier(&self) -> LoginIdentifier {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let username = non_blank(&self.username);
        let email = non_blank(&self.email).or_else(|| {
            username
                .as_deref()
                .filter(|v| v.contains('@'))
                .map(str::to_string)
        });

        LoginIdentifier {
            username: username.as_deref().map(normalize_username),
            email: email.as_deref().map(normalize_email),
        }
    }
}

/// A freshly minted access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginResponse {
    pub fn new(user: PublicUser, tokens: TokenPair) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}
