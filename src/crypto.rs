//! Cryptographic logics.

use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::config::Argon2 as ArgonConfig;

/// Hashing primitive failure.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// Argon2 rejected its parameters or the hash computation failed.
    #[error("argon2 error: {0}")]
    Argon2(String),
}

/// Why a verification failed: a candidate that does not match the hash, or
/// a stored value that is not a readable PHC string at all.
#[derive(thiserror::Error, Debug)]
pub enum VerifyError {
    /// Candidate password does not match the hash.
    #[error("password does not match")]
    Mismatch,
    /// Stored value could not be parsed as a PHC string.
    #[error("stored hash is not a valid PHC string: {0}")]
    BadHash(String),
}

/// Password manager that uses Argon2id and PHC string format for hashing and
/// verification.
#[derive(Clone)]
pub struct PasswordManager {
    params: Params,
}

impl PasswordManager {
    /// Create a new [`PasswordManager`].
    pub fn new(config: Option<ArgonConfig>) -> Result<Self, HashError> {
        let config = config.unwrap_or_default();

        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(config.hash_length),
        )
        .map_err(|err| HashError::Argon2(err.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        )
    }

    /// Hash password with a fresh random salt using Argon2id.
    pub fn hash_password(
        &self,
        password: impl AsRef<[u8]>,
    ) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_ref(), &salt)
            .map_err(|e| HashError::Argon2(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify password against a PHC string.
    ///
    /// A mismatch is [`VerifyError::Mismatch`]; an unparseable stored hash
    /// is [`VerifyError::BadHash`].
    pub fn verify_password(
        &self,
        password: impl AsRef<[u8]>,
        phc_hash: &str,
    ) -> Result<(), VerifyError> {
        let parsed = PasswordHash::new(phc_hash)
            .map_err(|e| VerifyError::BadHash(e.to_string()))?;

        self.argon2()
            .verify_password(password.as_ref(), &parsed)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => VerifyError::Mismatch,
                other => VerifyError::BadHash(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> PasswordManager {
        // Lightweight parameters, hashing strength is not under test.
        let config = ArgonConfig {
            memory_cost: 1024,
            iterations: 1,
            parallelism: 1,
            hash_length: 32,
        };
        PasswordManager::new(Some(config)).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let pwd = manager();

        let hash = pwd.hash_password("s3cret!").unwrap();
        assert_ne!(hash, "s3cret!");
        assert!(hash.starts_with("$argon2id$"));
        assert!(pwd.verify_password("s3cret!", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_is_mismatch() {
        let pwd = manager();

        let hash = pwd.hash_password("s3cret!").unwrap();
        let err = pwd.verify_password("wrong", &hash).unwrap_err();
        assert!(matches!(err, VerifyError::Mismatch));
    }

    #[test]
    fn test_malformed_hash_is_not_mismatch() {
        let pwd = manager();

        let err = pwd.verify_password("s3cret!", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, VerifyError::BadHash(_)));
    }

    #[test]
    fn test_salts_are_random() {
        let pwd = manager();

        let first = pwd.hash_password("s3cret!").unwrap();
        let second = pwd.hash_password("s3cret!").unwrap();
        assert_ne!(first, second);
    }
}
