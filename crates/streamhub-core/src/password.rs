//! Password hashing and verification using bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

/// Hashes with an explicit bcrypt cost. Seeders and tests use a low cost.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on a wrong password; errors only when `hash` is not a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password_with_cost("correct-horse", TEST_COST).unwrap();
        assert!(verify_password("correct-horse", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password_with_cost("correct-horse", TEST_COST).unwrap();
        assert!(!verify_password("battery-staple", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        assert!(verify_password("whatever", "not_a_valid_bcrypt_hash").is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password_with_cost("samepassword", TEST_COST).unwrap();
        let second = hash_password_with_cost("samepassword", TEST_COST).unwrap();
        assert_ne!(first, second);
        assert_ne!(first, "samepassword");
    }
}
