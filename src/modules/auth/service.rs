use streamhub_auth::{
    Subject, TokenError, create_access_token, create_refresh_token, verify_refresh_token,
};
use streamhub_config::JwtConfig;
use streamhub_core::{AppError, hash_password, verify_password};
use streamhub_db::UserRepository;
use streamhub_models::{
    AccountUpdate, ChangePasswordDto, LoginRequest, LoginResponse, NewUser, PublicUser,
    RegisterUserDto, TokenPair, UpdateAccountDto, UserId, UserRecord, UserRole, normalize_email,
    normalize_username,
};
use streamhub_observability::{
    track_login_failure, track_login_success, track_token_issued, track_token_refresh,
    track_user_registered,
};
use tracing::{info, instrument, warn};

/// Session lifecycle: credentials in, token pairs out, one live refresh
/// token per user.
pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto), fields(username = %dto.username))]
    pub async fn register(
        users: &dyn UserRepository,
        dto: RegisterUserDto,
    ) -> Result<PublicUser, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let record = users
            .create(NewUser {
                username: normalize_username(&dto.username),
                email: normalize_email(&dto.email),
                full_name: dto.full_name.trim().to_string(),
                avatar: dto.avatar.unwrap_or_default(),
                cover_image: dto.cover_image.unwrap_or_default(),
                password_hash,
                role: UserRole::User,
            })
            .await?;

        track_user_registered();
        info!(user_id = %record.id, "User registered");
        Ok(record.into())
    }

    #[instrument(skip(users, dto, jwt_config))]
    pub async fn login(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let identifier = dto.identifier();

        let Some(user) = users
            .find_by_username_or_email(identifier.username.as_deref(), identifier.email.as_deref())
            .await?
        else {
            track_login_failure("unknown_user");
            warn!("Login attempt for unknown user");
            return Err(AppError::not_found("User does not exist"));
        };

        if !verify_password(&dto.password, &user.password)? {
            track_login_failure("invalid_password");
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::invalid_credentials("Invalid user credentials"));
        }

        let tokens = Self::issue_tokens(users, &user, jwt_config).await?;

        track_login_success();
        info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse::new(user.into(), tokens))
    }

    /// Rotates the session: the presented refresh token is spent and a new
    /// pair replaces it.
    ///
    /// The compare and the write are not atomic. Two concurrent refreshes with
    /// the same token can both succeed; the last write wins and the other
    /// caller's new refresh token fails with `TOKEN_REUSE` on its next use.
    #[instrument(skip(users, incoming, jwt_config))]
    pub async fn refresh(
        users: &dyn UserRepository,
        incoming: Option<&str>,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPair, AppError> {
        let incoming = incoming.filter(|token| !token.is_empty()).ok_or_else(|| {
            AppError::unauthorized("Unauthorized request: No refresh token provided")
        })?;

        let claims = verify_refresh_token(incoming, jwt_config).map_err(|e| {
            track_token_refresh("invalid");
            warn!(error = %e, "Refresh token rejected");
            match e {
                TokenError::Expired => AppError::unauthorized("Refresh token has expired"),
                TokenError::Signing(_) => AppError::from(e),
                _ => AppError::unauthorized("Invalid refresh token"),
            }
        })?;

        let user_id = claims.subject_id().map(UserId::from_uuid).ok_or_else(|| {
            track_token_refresh("invalid");
            AppError::unauthorized("Invalid refresh token")
        })?;

        let user = users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.refresh_token.as_deref() != Some(incoming) {
            track_token_refresh("reused");
            warn!(user_id = %user.id, "Refresh token does not match the active session");
            return Err(AppError::token_reuse("Refresh token is expired or used"));
        }

        let tokens = Self::issue_tokens(users, &user, jwt_config).await?;

        track_token_refresh("success");
        info!(user_id = %user.id, "Session refreshed");
        Ok(tokens)
    }

    /// Revokes the user's refresh token. Calling it again is a no-op.
    #[instrument(skip(users))]
    pub async fn logout(users: &dyn UserRepository, user_id: UserId) -> Result<(), AppError> {
        if !users.set_refresh_token(user_id, None).await? {
            warn!(user_id = %user_id, "Logout for a user that no longer exists");
        }
        Ok(())
    }

    /// Does not revoke the current refresh token.
    #[instrument(skip(users, dto))]
    pub async fn change_password(
        users: &dyn UserRepository,
        user_id: UserId,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let user = users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !verify_password(&dto.old_password, &user.password)? {
            warn!(user_id = %user_id, "Password change with wrong old password");
            return Err(AppError::invalid_credentials("Invalid old password"));
        }

        let password_hash = hash_password(&dto.new_password)?;
        if !users.update_password(user_id, &password_hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    #[instrument(skip(users))]
    pub async fn current_user(
        users: &dyn UserRepository,
        user_id: UserId,
    ) -> Result<PublicUser, AppError> {
        users
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(users, dto))]
    pub async fn update_account(
        users: &dyn UserRepository,
        user_id: UserId,
        dto: UpdateAccountDto,
    ) -> Result<PublicUser, AppError> {
        let update = AccountUpdate {
            full_name: dto.full_name.trim().to_string(),
            email: normalize_email(&dto.email),
        };

        users
            .update_account(user_id, update)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Mints a pair and stores the refresh half, replacing the old one.
    async fn issue_tokens(
        users: &dyn UserRepository,
        user: &UserRecord,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPair, AppError> {
        let access_token = create_access_token(
            user.id.into_inner(),
            &user.username,
            &user.email,
            user.role.as_str(),
            jwt_config,
        )?;
        let refresh_token = create_refresh_token(user.id.into_inner(), jwt_config)?;

        if !users.set_refresh_token(user.id, Some(&refresh_token)).await? {
            return Err(AppError::not_found("User not found"));
        }

        track_token_issued("access");
        track_token_issued("refresh");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamhub_core::{ErrorKind, hash_password_with_cost};
    use streamhub_db::InMemoryUserRepository;

    const PASSWORD: &str = "correct-horse";

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            access_token_secret: "service-test-access-secret".to_string(),
            refresh_token_secret: "service-test-refresh-secret".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 3600,
        }
    }

    async fn seeded() -> (InMemoryUserRepository, UserRecord) {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                full_name: "Alice Liddell".to_string(),
                avatar: String::new(),
                cover_image: String::new(),
                password_hash: hash_password_with_cost(PASSWORD, 4).unwrap(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        (repo, user)
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: Some(username.to_string()),
            email: None,
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_refresh_token() {
        let (repo, user) = seeded().await;
        let response = AuthService::login(&repo, login_request("alice", PASSWORD), &jwt_config())
            .await
            .unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some(response.refresh_token.as_str()));
        assert_eq!(response.user.username, "alice");
    }

    #[tokio::test]
    async fn test_login_by_email_case_insensitive() {
        let (repo, _) = seeded().await;
        let request = LoginRequest {
            username: None,
            email: Some(" Alice@Example.COM ".to_string()),
            password: PASSWORD.to_string(),
        };
        assert!(AuthService::login(&repo, request, &jwt_config()).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_untouched() {
        let (repo, user) = seeded().await;
        repo.set_refresh_token(user.id, Some("existing")).await.unwrap();

        let err = AuthService::login(&repo, login_request("alice", "wrong-pass"), &jwt_config())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("existing"));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (repo, _) = seeded().await;
        let err = AuthService::login(&repo, login_request("nobody", PASSWORD), &jwt_config())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_rejects_reuse() {
        let (repo, user) = seeded().await;
        let config = jwt_config();
        let login = AuthService::login(&repo, login_request("alice", PASSWORD), &config)
            .await
            .unwrap();

        let rotated = AuthService::refresh(&repo, Some(&login.refresh_token), &config)
            .await
            .unwrap();
        assert_ne!(rotated.refresh_token, login.refresh_token);

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some(rotated.refresh_token.as_str()));

        let err = AuthService::refresh(&repo, Some(&login.refresh_token), &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenReuse);
    }

    #[tokio::test]
    async fn test_interleaved_refresh_last_writer_wins() {
        let (repo, user) = seeded().await;
        let config = jwt_config();
        let login = AuthService::login(&repo, login_request("alice", PASSWORD), &config)
            .await
            .unwrap();

        let first = AuthService::refresh(&repo, Some(&login.refresh_token), &config)
            .await
            .unwrap();
        // A second refresh that read the old token before the first write landed.
        repo.set_refresh_token(user.id, Some(&login.refresh_token))
            .await
            .unwrap();
        let second = AuthService::refresh(&repo, Some(&login.refresh_token), &config)
            .await
            .unwrap();

        let err = AuthService::refresh(&repo, Some(&first.refresh_token), &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenReuse);
        assert!(AuthService::refresh(&repo, Some(&second.refresh_token), &config)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_refresh_without_token_is_unauthorized() {
        let (repo, _) = seeded().await;
        let err = AuthService::refresh(&repo, None, &jwt_config()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let err = AuthService::refresh(&repo, Some(""), &jwt_config()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_access_token_cannot_refresh() {
        let (repo, _) = seeded().await;
        let config = jwt_config();
        let login = AuthService::login(&repo, login_request("alice", PASSWORD), &config)
            .await
            .unwrap();

        let err = AuthService::refresh(&repo, Some(&login.access_token), &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid refresh token");
    }

    #[tokio::test]
    async fn test_expired_refresh_token() {
        let (repo, user) = seeded().await;
        let config = JwtConfig {
            refresh_token_expiry: -60,
            ..jwt_config()
        };
        let token = create_refresh_token(user.id.into_inner(), &config).unwrap();
        repo.set_refresh_token(user.id, Some(&token)).await.unwrap();

        let err = AuthService::refresh(&repo, Some(&token), &config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Refresh token has expired");
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (repo, user) = seeded().await;
        let config = jwt_config();
        let login = AuthService::login(&repo, login_request("alice", PASSWORD), &config)
            .await
            .unwrap();

        AuthService::logout(&repo, user.id).await.unwrap();
        AuthService::logout(&repo, user.id).await.unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());

        let err = AuthService::refresh(&repo, Some(&login.refresh_token), &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenReuse);
    }

    #[tokio::test]
    async fn test_change_password() {
        let (repo, user) = seeded().await;
        let dto = ChangePasswordDto {
            old_password: "not-it".to_string(),
            new_password: "brand-new-password".to_string(),
        };
        let err = AuthService::change_password(&repo, user.id, dto).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);

        let dto = ChangePasswordDto {
            old_password: PASSWORD.to_string(),
            new_password: "brand-new-password".to_string(),
        };
        AuthService::change_password(&repo, user.id, dto).await.unwrap();

        let config = jwt_config();
        assert!(
            AuthService::login(&repo, login_request("alice", PASSWORD), &config)
                .await
                .is_err()
        );
        assert!(
            AuthService::login(&repo, login_request("alice", "brand-new-password"), &config)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_register_normalizes_and_forces_user_role() {
        let repo = InMemoryUserRepository::new();
        let dto = RegisterUserDto {
            username: " Bob ".to_string(),
            email: "BOB@Example.com".to_string(),
            full_name: " Bob Builder ".to_string(),
            password: "long-enough".to_string(),
            avatar: None,
            cover_image: None,
        };
        let user = AuthService::register(&repo, dto.clone()).await.unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.email, "bob@example.com");
        assert_eq!(user.full_name, "Bob Builder");
        assert_eq!(user.role, UserRole::User);

        let err = AuthService::register(&repo, dto).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_account_and_current_user() {
        let (repo, user) = seeded().await;
        let updated = AuthService::update_account(
            &repo,
            user.id,
            UpdateAccountDto {
                full_name: "Alice L.".to_string(),
                email: "ALICE@new.example.com".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.email, "alice@new.example.com");

        let current = AuthService::current_user(&repo, user.id).await.unwrap();
        assert_eq!(current.full_name, "Alice L.");

        let err = AuthService::current_user(&repo, UserId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
