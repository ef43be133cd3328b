//! # StreamHub DB
//!
//! Credential store for the StreamHub API.
//!
//! The session layer only sees the [`UserRepository`] trait. Two backends
//! implement it:
//!
//! - [`PgUserRepository`]: PostgreSQL via SQLx, used when `DATABASE_URL` is set
//! - [`InMemoryUserRepository`]: process-local map for development and tests
//!
//! # Example
//!
//! ```ignore
//! use streamhub_db::{PgUserRepository, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let users = PgUserRepository::new(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::StoreError;
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;
pub use repository::UserRepository;

use sqlx::postgres::PgPoolOptions;

/// Connects a PostgreSQL pool.
///
/// Call once at startup; the pool is cheaply cloneable.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

pub use sqlx::PgPool;
