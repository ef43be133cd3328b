//! # StreamHub CLI
//!
//! Administrative operations the public API deliberately does not expose:
//! creating `manager`/`admin` accounts, changing roles, revoking sessions,
//! and seeding fake users for development.
//!
//! ```ignore
//! use streamhub_cli::seeder::seed_users;
//!
//! let inserted = seed_users(&pool, 500).await?;
//! ```

pub mod admin;
pub mod seeder;
