use std::sync::Arc;

use streamhub_config::{CookieConfig, CorsConfig, JwtConfig};
use streamhub_db::{InMemoryUserRepository, PgUserRepository, UserRepository, init_db_pool};
use tracing::{info, warn};

/// Shared, immutable application state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            jwt_config: JwtConfig::from_env(),
            cookie_config: CookieConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cookie_config", &self.cookie_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Picks the store backend from `DATABASE_URL` and loads config from the
/// environment. Pending migrations are applied before the pool is handed out.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let users: Arc<dyn UserRepository> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = init_db_pool(&database_url).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!("Connected to PostgreSQL, migrations applied");
            Arc::new(PgUserRepository::new(pool))
        }
        Err(_) => {
            warn!("DATABASE_URL not set, using in-memory user store; data will not persist");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let state = AppState::new(users);
    if state.jwt_config.uses_default_secrets() {
        warn!("ACCESS_TOKEN_SECRET or REFRESH_TOKEN_SECRET not set, using development secrets");
    }

    Ok(state)
}
