use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Extension, Router, middleware};
use streamhub::middleware::auth::AuthUser;
use streamhub::middleware::role::{RoleGate, enforce_roles};
use streamhub_models::{UserId, UserRole};
use tower::ServiceExt;

fn gated(roles: &[UserRole]) -> Router {
    Router::new().route(
        "/",
        get(|| async { "ok" }).route_layer(middleware::from_fn_with_state(
            RoleGate::new(roles.iter().copied()),
            enforce_roles,
        )),
    )
}

fn caller(role: UserRole) -> AuthUser {
    AuthUser {
        id: UserId::new(),
        username: "caller".to_string(),
        email: "caller@example.com".to_string(),
        role,
    }
}

async fn call(app: Router) -> StatusCode {
    app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_gate_without_auth_user_is_unauthorized() {
    let app = gated(&[UserRole::User]);
    assert_eq!(call(app).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_with_listed_role_passes() {
    let app = gated(&[UserRole::Manager]).layer(Extension(caller(UserRole::Manager)));
    assert_eq!(call(app).await, StatusCode::OK);
}

#[tokio::test]
async fn test_gate_with_unlisted_role_is_forbidden() {
    let app = gated(&[UserRole::Manager]).layer(Extension(caller(UserRole::Admin)));
    assert_eq!(call(app).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_on_admin_only_route_is_forbidden() {
    let app = gated(&[UserRole::Admin]).layer(Extension(caller(UserRole::User)));
    assert_eq!(call(app).await, StatusCode::FORBIDDEN);
}
