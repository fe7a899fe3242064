//! Password hashing and verification.
//!
//! One-way salted hashing with Argon2. The plaintext password never leaves
//! this module's function arguments and is never persisted or logged.

use anyhow::{Result, anyhow};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Hash a password with a freshly generated salt.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password: {e}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash. A malformed stored hash
/// verifies as false rather than erroring.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("senhaForte123").unwrap();

        assert!(verify_password(&hash, "senhaForte123"));
        assert!(!verify_password(&hash, "senhaErrada"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("senhaForte123").unwrap();
        let second = hash_password("senhaForte123").unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("senhaForte123"));
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!verify_password("not-a-phc-string", "senhaForte123"));
    }
}
