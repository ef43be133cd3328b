//! Fake user seeding for development databases.
//!
//! Every seeded account gets the `user` role, an `@example.com` address and
//! the same password, hashed once up front.

use fake::Fake;
use fake::faker::internet::en::Username;
use fake::faker::name::en::Name;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use streamhub_core::hash_password;
use streamhub_models::UserRole;

use crate::admin::CliResult;

pub const SEED_PASSWORD: &str = "password123";
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

// 7 params per user
const BATCH_SIZE: usize = 1000;

pub struct UserSeed {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Generates `count` users. Usernames end in `_<index>`, so they are
/// unique within one run.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let handle: String = Username().fake();
            let handle: String = handle
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            let username = format!("{}_{}", handle, idx);

            UserSeed {
                email: format!("{}@{}", username, SEED_EMAIL_DOMAIN),
                username,
                full_name: Name().fake(),
                password_hash: password_hash.to_string(),
                role: UserRole::User,
            }
        })
        .collect()
}

/// Inserts `count` fake users, skipping any that collide with existing
/// usernames or emails. Returns how many rows were inserted.
pub async fn seed_users(db: &PgPool, count: usize) -> CliResult<u64> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let password_hash = hash_password(SEED_PASSWORD)?;
    let users = generate_users(count, &password_hash);

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in users.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO users (username, email, full_name, avatar, cover_image, password, role) ",
        );
        query.push_values(chunk, |mut row, user| {
            row.push_bind(&user.username)
                .push_bind(&user.email)
                .push_bind(&user.full_name)
                .push_bind("")
                .push_bind("")
                .push_bind(&user.password_hash)
                .push_bind(user.role);
        });
        query.push(" ON CONFLICT DO NOTHING");

        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} users in {:?} (password: {})",
        inserted,
        start_time.elapsed(),
        SEED_PASSWORD
    );
    Ok(inserted)
}

/// Deletes every `user`-role account on the seed email domain.
pub async fn clear_seeded_users(db: &PgPool) -> CliResult<u64> {
    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1 AND role = $2")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .bind(UserRole::User)
        .execute(db)
        .await?;

    println!("🗑️  Removed {} seeded users", result.rows_affected());
    Ok(result.rows_affected())
}
