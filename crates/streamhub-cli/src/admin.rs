//! Account administration against the credential store.

use streamhub_core::hash_password;
use streamhub_db::UserRepository;
use streamhub_models::{
    NewUser, PublicUser, RegisterUserDto, UserRecord, UserRole, normalize_email,
    normalize_username,
};
use validator::Validate;

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Input for [`create_user`]. Unlike public registration, any role is allowed.
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
}

pub async fn create_user(
    users: &dyn UserRepository,
    input: CreateUserInput,
) -> CliResult<PublicUser> {
    let dto = RegisterUserDto {
        username: input.username,
        email: input.email,
        full_name: input.full_name,
        password: input.password,
        avatar: None,
        cover_image: None,
    };
    dto.validate()?;

    let record = users
        .create(NewUser {
            username: normalize_username(&dto.username),
            email: normalize_email(&dto.email),
            full_name: dto.full_name.trim().to_string(),
            avatar: String::new(),
            cover_image: String::new(),
            password_hash: hash_password(&dto.password)?,
            role: input.role,
        })
        .await?;

    Ok(record.into())
}

/// Looks a user up by username, or by email when the value contains `@`.
pub async fn find_user(users: &dyn UserRepository, identifier: &str) -> CliResult<UserRecord> {
    let email = identifier.contains('@').then(|| normalize_email(identifier));
    let username = normalize_username(identifier);

    users
        .find_by_username_or_email(Some(&username), email.as_deref())
        .await?
        .ok_or_else(|| format!("No user matches '{}'", identifier).into())
}

pub async fn set_role(
    users: &dyn UserRepository,
    identifier: &str,
    role: UserRole,
) -> CliResult<UserRecord> {
    let user = find_user(users, identifier).await?;
    if !users.update_role(user.id, role).await? {
        return Err(format!("User '{}' disappeared during update", identifier).into());
    }
    Ok(user)
}

/// Clears the stored refresh token; the user's current session can no
/// longer be refreshed.
pub async fn revoke_session(users: &dyn UserRepository, identifier: &str) -> CliResult<UserRecord> {
    let user = find_user(users, identifier).await?;
    users.set_refresh_token(user.id, None).await?;
    Ok(user)
}
