use std::env;

/// Attributes applied to the `accessToken` and `refreshToken` cookies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    /// Adds the `Secure` attribute. On when `APP_ENV=production`.
    pub secure: bool,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: false,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        Self::for_environment(&app_env)
    }

    pub fn for_environment(app_env: &str) -> Self {
        Self {
            secure: app_env.eq_ignore_ascii_case("production"),
            ..Self::default()
        }
    }
}
