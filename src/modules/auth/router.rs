use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{
    change_password, get_current_user, login_user, logout_user, refresh_access_token,
    register_user, update_user,
};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout_user))
        .route("/change-password", post(change_password))
        .route("/current-user", get(get_current_user))
        .route("/update-user", patch(update_user))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh-token", post(refresh_access_token))
        .merge(protected)
}
