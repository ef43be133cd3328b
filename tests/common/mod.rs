#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use streamhub::router::init_router;
use streamhub::state::AppState;
use streamhub_config::{CookieConfig, CorsConfig, JwtConfig};
use streamhub_core::hash_password_with_cost;
use streamhub_db::{InMemoryUserRepository, UserRepository};
use streamhub_models::{NewUser, UserRecord, UserRole};
use tower::ServiceExt;

pub const PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub jwt_config: JwtConfig,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_token_secret: "integration-access-secret-0123456789".to_string(),
        refresh_token_secret: "integration-refresh-secret-0123456789".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 3600,
    }
}

pub fn build_app(jwt_config: JwtConfig) -> TestApp {
    let users = Arc::new(InMemoryUserRepository::new());
    let state = AppState {
        users: users.clone(),
        jwt_config: jwt_config.clone(),
        cookie_config: CookieConfig::default(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    };

    TestApp {
        router: init_router(state),
        users,
        jwt_config,
    }
}

pub fn spawn_app() -> TestApp {
    build_app(test_jwt_config())
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Inserts a user with [`PASSWORD`] hashed at the minimum bcrypt cost.
    pub async fn seed_user(&self, username: &str, role: UserRole) -> UserRecord {
        self.seed_user_with_email(username, &format!("{}@example.com", username), role)
            .await
    }

    pub async fn seed_user_with_email(
        &self,
        username: &str,
        email: &str,
        role: UserRole,
    ) -> UserRecord {
        self.users
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                full_name: format!("{} Tester", username),
                avatar: String::new(),
                cover_image: String::new(),
                password_hash: hash_password_with_cost(PASSWORD, 4).unwrap(),
                role,
            })
            .await
            .unwrap()
    }

    pub async fn stored(&self, user: &UserRecord) -> UserRecord {
        self.users.find_by_id(user.id).await.unwrap().unwrap()
    }

    /// Logs in and returns `(access_token, refresh_token)` from the body.
    pub async fn login(&self, username: &str) -> (String, String) {
        let response = self
            .send(json_request(
                "POST",
                "/api/v1/auth/login",
                serde_json::json!({ "username": username, "password": PASSWORD }),
            ))
            .await;
        let body = body_json(response).await;
        (
            body["data"]["accessToken"].as_str().unwrap().to_string(),
            body["data"]["refreshToken"].as_str().unwrap().to_string(),
        )
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn cookie_request(method: &str, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The value a `Set-Cookie` header assigns to `name`, if any.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    set_cookies(response).into_iter().find_map(|cookie| {
        cookie
            .strip_prefix(&prefix)
            .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
    })
}
