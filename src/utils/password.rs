use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

use crate::error::AppResult;

/// Hash a password using Argon2id with the default (strong) parameters.
///
/// # Returns
/// The PHC-formatted hash string, salt included.
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();

    let password_hash = argon2.hash_password(password.as_bytes())?.to_string();

    Ok(password_hash)
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)?;
    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_formatted() {
        let hash = hash_password("top_secret_cat").expect("Failed to hash password");

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = hash_password("top_secret_cat").expect("Failed to hash password");

        assert!(!hash.contains("top_secret_cat"));
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let hash = hash_password("top_secret_cat").expect("Failed to hash password");

        assert!(verify_password("top_secret_cat", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("top_secret_cat").expect("Failed to hash password");

        assert!(!verify_password("wrong_password", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_salting_produces_distinct_hashes() {
        let hash1 = hash_password("top_secret_cat").expect("Failed to hash password");
        let hash2 = hash_password("top_secret_cat").expect("Failed to hash password");

        assert_ne!(hash1, hash2);
        assert!(verify_password("top_secret_cat", &hash1).unwrap());
        assert!(verify_password("top_secret_cat", &hash2).unwrap());
    }
}
