// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Hashes with Argon2id and a per-password random salt. Plaintext only
/// exists on the write path; it is never persisted or logged.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = PasswordService::hash_password("hunter22").unwrap();
        assert!(PasswordService::verify_password("hunter22", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = PasswordService::hash_password("hunter22").unwrap();
        assert!(!PasswordService::verify_password("hunter23", &hash).unwrap());
    }

    #[test]
    fn hash_is_not_the_plaintext() {
        let hash = PasswordService::hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Per-password salts mean two hashes of the same input differ
        let a = PasswordService::hash_password("hunter22").unwrap();
        let b = PasswordService::hash_password("hunter22").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(PasswordService::verify_password("hunter22", "not-a-phc-string").is_err());
    }
}
