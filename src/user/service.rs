use tokio::task::spawn_blocking;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::crypto::{PasswordManager, VerifyError};
use crate::error::{Result, StoreError};
use crate::user::{User, UserRepository};

/// User manager.
///
/// Every write goes validate, then hash-if-modified, then commit; the hash
/// step completes before the repository is touched, so no write can observe
/// a plaintext password. The service holds no per-record state between
/// calls.
#[derive(Clone)]
pub struct UserService<R> {
    repo: R,
    hasher: PasswordManager,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new [`UserService`].
    pub fn new(repo: R, hasher: PasswordManager) -> Self {
        Self { repo, hasher }
    }

    /// Create a new record.
    ///
    /// Validates, hashes the initial password and inserts. A second record
    /// with the same email fails with [`StoreError::EmailTaken`].
    pub async fn create(&self, mut user: User) -> Result<User> {
        user.validate()?;
        self.hash_pending_password(&mut user).await?;
        self.repo.insert(&user).await?;

        tracing::info!(user_id = %user.id, "user created");

        Ok(user)
    }

    /// Persist changes to an existing record.
    ///
    /// Re-hashes only when the password changed since the record was
    /// loaded; an email-only update leaves the stored hash untouched.
    pub async fn save(&self, user: &mut User) -> Result<()> {
        user.validate()?;
        self.hash_pending_password(user).await?;
        self.repo.update(user).await
    }

    /// Check `candidate` against the record's stored hash.
    ///
    /// A wrong password is [`StoreError::WrongPassword`]; an unreadable
    /// stored hash is [`StoreError::CorruptHash`]. The hash is never
    /// decrypted.
    pub async fn verify_password(
        &self,
        user: &User,
        candidate: &str,
    ) -> Result<()> {
        let hasher = self.hasher.clone();
        let stored = user.password().to_owned();
        let candidate = candidate.to_owned();

        spawn_blocking(move || hasher.verify_password(candidate, &stored))
            .await
            .map_err(|err| StoreError::Internal {
                details: err.to_string(),
            })?
            .map_err(|err| match err {
                VerifyError::Mismatch => StoreError::WrongPassword,
                VerifyError::BadHash(details) => StoreError::CorruptHash(details),
            })
    }

    /// Find the record registered under `email`, then verify the candidate
    /// password against it.
    pub async fn authenticate(
        &self,
        email: &str,
        candidate: &str,
    ) -> Result<User> {
        let user = self.find_by_email(email).await?;
        self.verify_password(&user, candidate).await?;

        Ok(user)
    }

    /// Find a record using `id` field.
    pub async fn find_by_id(&self, user_id: &str) -> Result<User> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Find a record using `email` field.
    pub async fn find_by_email(&self, email: &str) -> Result<User> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Delete a record.
    pub async fn delete(&self, user_id: &str) -> Result<()> {
        self.repo.delete(user_id).await?;

        tracing::info!(%user_id, "user deleted");

        Ok(())
    }

    /// Hash-before-write step shared by [`UserService::create`] and
    /// [`UserService::save`].
    ///
    /// Untouched passwords pass through unchanged; a pending one is hashed
    /// with a fresh salt off the async executor, and the computed hash
    /// replaces the in-flight value before the commit. Hash failure aborts
    /// the write.
    async fn hash_pending_password(&self, user: &mut User) -> Result<()> {
        if !user.password_modified() {
            return Ok(());
        }

        if user.password().is_empty() {
            return Err(missing_password().into());
        }

        let hasher = self.hasher.clone();
        let plaintext = user.password().to_owned();

        let hash = spawn_blocking(move || hasher.hash_password(plaintext))
            .await
            .map_err(|err| StoreError::Internal {
                details: err.to_string(),
            })??;

        user.install_hash(hash);
        Ok(())
    }
}

fn missing_password() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(
        "password",
        ValidationError::new("required")
            .with_message("Password is required.".into()),
    );
    errors
}
