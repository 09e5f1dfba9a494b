//! Password digests.
//!
//! Argon2id with the crate's default cost parameters and a fresh salt per
//! digest. The `*_blocking` variants move the work off the async reactor.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::Result;

pub fn hash_password(plain: &str) -> std::result::Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(password_hash)
}

/// Returns `Ok(false)` on mismatch; only a malformed digest is an error.
pub fn verify_password(plain: &str, hashed: &str) -> std::result::Result<bool, password_hash::Error> {
    let parsed_hash = PasswordHash::new(hashed)?;
    let ok = Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(ok)
}

pub async fn hash_password_blocking(plain: String) -> Result<String> {
    let digest = tokio::task::spawn_blocking(move || hash_password(&plain)).await??;
    Ok(digest)
}

pub async fn verify_password_blocking(plain: String, hashed: String) -> Result<bool> {
    let ok = tokio::task::spawn_blocking(move || verify_password(&plain, &hashed)).await??;
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn digest_is_not_plaintext_and_verifies() {
        let digest = hash_password("password123").unwrap();
        assert_ne!(digest, "password123");
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify_password("password123", &digest).unwrap());
    }

    #[test]
    fn same_password_yields_different_digests() {
        let a = hash_password("password123").unwrap();
        let b = hash_password("password123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("password123", &a).unwrap());
        assert!(verify_password("password123", &b).unwrap());
    }

    #[test]
    fn mismatch_is_false_not_error() {
        let digest = hash_password("password123").unwrap();
        assert!(!verify_password("password124", &digest).unwrap());
        assert!(!verify_password("", &digest).unwrap());
    }

    #[test]
    fn malformed_digest_is_error() {
        assert!(verify_password("password123", "not-a-phc-string").is_err());
    }

    #[tokio::test]
    async fn blocking_wrappers_agree() {
        let digest = assert_ok!(hash_password_blocking("s3cret".to_string()).await);
        assert!(assert_ok!(verify_password_blocking("s3cret".to_string(), digest.clone()).await));
        assert!(!assert_ok!(verify_password_blocking("other".to_string(), digest).await));
    }
}
