//! Argon2id-backed `PasswordHasher` adapter.
//!
//! Hashes are stored as PHC strings, so the salt and cost parameters travel
//! with the hash. Hashing is CPU-bound and runs on the blocking pool.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as PhcError, PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Salted one-way hashing with default Argon2id parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let candidate = Zeroizing::new(candidate.to_owned());
        let stored = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&candidate, &stored))
            .await
            .map_err(|err| PasswordHashError::hash(format!("verification task failed: {err}")))?
    }
}

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash::new(hash.to_string()))
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(candidate: &str, stored: &str) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcString::new(stored).map_err(|err| PasswordHashError::malformed(err.to_string()))?;
    match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(other) => Err(PasswordHashError::hash(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn hash_round_trips_through_verify() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("pw1").await.expect("hash succeeds");

        assert_ne!(hash.as_ref(), "pw1");
        assert!(hash.as_ref().starts_with("$argon2id$"));
        assert!(hasher.verify("pw1", &hash).await.expect("verify runs"));
        assert!(!hasher.verify("pw2", &hash).await.expect("verify runs"));
    }

    #[rstest]
    #[tokio::test]
    async fn each_hash_uses_a_fresh_salt() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("pw1").await.expect("hash succeeds");
        let second = hasher.hash("pw1").await.expect("hash succeeds");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hash_is_reported() {
        let err = Argon2PasswordHasher
            .verify("pw1", &PasswordHash::new("plaintext"))
            .await
            .expect_err("malformed hash must fail");
        assert!(matches!(err, PasswordHashError::Malformed { .. }));
    }
}
