use axum::{extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use streamhub_core::{ApiResponse, AppError};
use streamhub_models::{
    ChangePasswordDto, LoginRequest, LoginResponse, PublicUser, RegisterUserDto, TokenPair,
    UpdateAccountDto,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::cookies::{clear_session_cookies, refresh_token_from, set_session_cookies};
use super::service::AuthService;

#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<ApiResponse<PublicUser>, AppError> {
    let user = AuthService::register(state.users.as_ref(), dto).await?;
    Ok(ApiResponse::new(
        StatusCode::CREATED,
        user,
        "User registered successfully",
    ))
}

#[instrument(skip(state, jar, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), AppError> {
    let response = AuthService::login(state.users.as_ref(), dto, &state.jwt_config).await?;

    let tokens = TokenPair {
        access_token: response.access_token.clone(),
        refresh_token: response.refresh_token.clone(),
    };
    let jar = set_session_cookies(jar, &state.cookie_config, &tokens);

    Ok((jar, ApiResponse::ok(response, "User logged in successfully")))
}

#[instrument(skip(state, jar), fields(user_id = %user.id))]
pub async fn logout_user(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<()>), AppError> {
    AuthService::logout(state.users.as_ref(), user.id).await?;
    let jar = clear_session_cookies(jar, &state.cookie_config);
    Ok((jar, ApiResponse::message("User logged out")))
}

#[instrument(skip(state, jar))]
pub async fn refresh_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<TokenPair>), AppError> {
    let incoming = refresh_token_from(&jar);
    let tokens =
        AuthService::refresh(state.users.as_ref(), incoming.as_deref(), &state.jwt_config).await?;

    let jar = set_session_cookies(jar, &state.cookie_config, &tokens);
    Ok((jar, ApiResponse::ok(tokens, "Access token refreshed")))
}

#[instrument(skip(state, dto), fields(user_id = %user.id))]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<ApiResponse<()>, AppError> {
    AuthService::change_password(state.users.as_ref(), user.id, dto).await?;
    Ok(ApiResponse::message("Password changed successfully"))
}

#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<ApiResponse<PublicUser>, AppError> {
    let current = AuthService::current_user(state.users.as_ref(), user.id).await?;
    Ok(ApiResponse::ok(current, "Current user fetched successfully"))
}

#[instrument(skip(state, dto), fields(user_id = %user.id))]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateAccountDto>,
) -> Result<ApiResponse<PublicUser>, AppError> {
    let updated = AuthService::update_account(state.users.as_ref(), user.id, dto).await?;
    Ok(ApiResponse::ok(updated, "Account details updated successfully"))
}
