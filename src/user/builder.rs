//! Typed builder for User.

use uuid::Uuid;

use crate::user::User;

/// [`User`] builder.
///
/// Email and password are required; the identifier is always generated
/// here, random and collision-resistant, and has no setter.
#[derive(Debug, Clone)]
pub struct UserBuilder<Email, Password> {
    email: Email,
    password: Password,
}

/// Value is missing on [`UserBuilder`].
#[derive(Debug, Clone)]
pub struct Missing;

/// Value is present on [`UserBuilder`].
#[derive(Debug, Clone)]
pub struct Present<T>(pub T);

impl UserBuilder<Missing, Missing> {
    /// Create a new [`UserBuilder`].
    pub fn new() -> Self {
        Self {
            email: Missing,
            password: Missing,
        }
    }
}

impl Default for UserBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Password> UserBuilder<Missing, Password> {
    /// Update `email` field on [`UserBuilder`].
    pub fn email(
        self,
        email: impl Into<String>,
    ) -> UserBuilder<Present<String>, Password> {
        UserBuilder {
            email: Present(email.into()),
            password: self.password,
        }
    }
}

impl<Email> UserBuilder<Email, Missing> {
    /// Update `password` field on [`UserBuilder`].
    pub fn password(
        self,
        password: impl ToString,
    ) -> UserBuilder<Email, Present<String>> {
        UserBuilder {
            email: self.email,
            password: Present(password.to_string()),
        }
    }
}

impl UserBuilder<Present<String>, Present<String>> {
    /// Build a [`User`] with a freshly generated identifier.
    ///
    /// The initial password counts as modified, so the first write hashes
    /// it.
    pub fn build(self) -> User {
        User {
            id: Uuid::new_v4().to_string(),
            email: self.email.0,
            password: self.password.0,
            created_at: chrono::Utc::now().date_naive(),
            password_modified: true,
        }
    }
}
