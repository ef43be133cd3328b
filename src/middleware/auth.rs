use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use streamhub_auth::{Subject, verify_access_token};
use streamhub_core::AppError;
use streamhub_models::{UserId, UserRecord, UserRole};
use tracing::{debug, warn};

use crate::modules::auth::cookies::ACCESS_TOKEN_COOKIE;
use crate::state::AppState;

/// The authenticated caller, as stored at request time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl From<UserRecord> for AuthUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            role: record.role,
        }
    }
}

/// Bearer header first, then the `accessToken` cookie. Empty values count as absent.
fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Verifies the caller's access token and loads their current record.
pub async fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<AuthUser, AppError> {
    let token = extract_access_token(headers)
        .ok_or_else(|| AppError::unauthorized("Unauthorized request: No token provided"))?;

    let claims = verify_access_token(&token, &state.jwt_config).map_err(|e| {
        debug!(error = %e, "Access token rejected");
        AppError::from(e)
    })?;

    let user_id = claims
        .subject_id()
        .map(UserId::from_uuid)
        .ok_or_else(|| AppError::unauthorized("Invalid token"))?;

    let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
        warn!(user_id = %user_id, "Access token for a user that no longer exists");
        AppError::unauthorized("Invalid access token: User not found")
    })?;

    Ok(AuthUser::from(user))
}

/// Middleware that rejects unauthenticated requests and stores the
/// [`AuthUser`] in the request extensions for later gates and handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(req.headers(), &state).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&parts.headers, state).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
