use axum::{Router, middleware, routing::post};
use streamhub_models::UserRole;

use crate::middleware::auth::require_auth;
use crate::middleware::role::{RoleGate, enforce_roles};
use crate::state::AppState;

use super::controller::{admin_area, manager_area, user_area};

/// Role-gated routes. Each allow-list is fixed here, at construction.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin_gate = RoleGate::new([UserRole::Admin, UserRole::Manager, UserRole::User]);
    let manager_gate = RoleGate::new([UserRole::User, UserRole::Manager]);
    let user_gate = RoleGate::new([UserRole::User]);

    Router::new()
        .route(
            "/admin",
            post(admin_area).route_layer(middleware::from_fn_with_state(admin_gate, enforce_roles)),
        )
        .route(
            "/manager",
            post(manager_area)
                .route_layer(middleware::from_fn_with_state(manager_gate, enforce_roles)),
        )
        .route(
            "/user",
            post(user_area).route_layer(middleware::from_fn_with_state(user_gate, enforce_roles)),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
