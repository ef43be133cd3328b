//! Role-based authorization.
//!
//! Two ways to gate on roles:
//! 1. Layer-based: [`RoleGate`] + [`enforce_roles`] via
//!    `axum::middleware::from_fn_with_state`
//! 2. Inside handlers: [`check_role`] / [`check_any_role`]
//!
//! Both read the [`AuthUser`] attached by the auth gate, so the role checked
//! is the stored one, not the role claim baked into the token.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use streamhub_core::AppError;
use streamhub_models::UserRole;
use tracing::warn;

use crate::middleware::auth::AuthUser;

const FORBIDDEN_MESSAGE: &str = "Forbidden: Access Denied";

/// A fixed allow-list of roles for one route or router.
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Arc<[UserRole]>,
}

impl RoleGate {
    pub fn new(allowed: impl IntoIterator<Item = UserRole>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
    }

    pub fn allowed(&self) -> &[UserRole] {
        &self.allowed
    }
}

/// Middleware: 403 unless the caller's role is on the gate's allow-list.
///
/// Answers 401 when no [`AuthUser`] is present, i.e. when the auth gate did
/// not run first.
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/admin", post(handler))
///     .route_layer(middleware::from_fn_with_state(
///         RoleGate::new([UserRole::Admin]),
///         enforce_roles,
///     ));
/// ```
pub async fn enforce_roles(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized("Unauthorized request"))?;

    if !gate.allows(user.role) {
        warn!(
            user_id = %user.id,
            role = %user.role,
            allowed = ?gate.allowed(),
            "Role gate denied request"
        );
        return Err(AppError::forbidden(FORBIDDEN_MESSAGE));
    }

    Ok(next.run(req).await)
}

pub fn check_role(user: &AuthUser, role: UserRole) -> Result<(), AppError> {
    check_any_role(user, &[role])
}

pub fn check_any_role(user: &AuthUser, roles: &[UserRole]) -> Result<(), AppError> {
    if roles.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::forbidden(FORBIDDEN_MESSAGE))
    }
}
