use axum_extra::extract::cookie::{Cookie, CookieJar};
use streamhub_config::CookieConfig;
use streamhub_models::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn session_cookie(name: &'static str, value: String, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(config.secure)
        .path(config.path.clone())
        .build()
}

/// Adds both session cookies to the jar, replacing any previous values.
pub fn set_session_cookies(jar: CookieJar, config: &CookieConfig, tokens: &TokenPair) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        config,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        tokens.refresh_token.clone(),
        config,
    ))
}

fn removal_cookie(name: &'static str, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), config);
    cookie.make_removal();
    cookie
}

/// Expires both session cookies on the client, whether or not the request
/// carried them.
pub fn clear_session_cookies(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.add(removal_cookie(ACCESS_TOKEN_COOKIE, config))
        .add(removal_cookie(REFRESH_TOKEN_COOKIE, config))
}

pub fn refresh_token_from(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}
