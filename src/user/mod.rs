mod builder;
mod memory;
mod repository;
mod service;

pub use builder::*;
pub use memory::*;
pub use repository::*;
pub use service::*;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User as saved on database.
///
/// `password` holds the PHC hash once the record has been through a write;
/// between [`User::set_password`] and the next write it transiently holds
/// the pending plaintext, flagged by the modified marker so the write
/// boundary knows to hash it. A record loaded from storage starts with the
/// marker clear, so writes that leave the password untouched never re-hash
/// the stored value.
#[derive(
    Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow, Validate,
)]
pub struct User {
    pub id: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    #[serde(skip)]
    password: String,
    pub created_at: chrono::NaiveDate,
    #[sqlx(skip)]
    #[serde(skip)]
    password_modified: bool,
}

impl User {
    /// Start building a new [`User`].
    pub fn builder() -> UserBuilder<Missing, Missing> {
        UserBuilder::new()
    }

    /// Stored password value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Replace the password. The new value is hashed on the next write.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.password_modified = true;
    }

    /// Whether the password changed since the record was last written.
    pub fn password_modified(&self) -> bool {
        self.password_modified
    }

    /// Install the computed hash, consuming the pending state.
    pub(crate) fn install_hash(&mut self, hash: String) {
        self.password = hash;
        self.password_modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_builder_generates_random_ids() {
        let first = User::builder().email("a@example.com").password("pw").build();
        let second = User::builder().email("b@example.com").password("pw").build();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert!(first.password_modified());
    }

    #[test]
    fn test_set_password_marks_record() {
        let mut user = User::default();
        assert!(!user.password_modified());

        user.set_password("s3cret!");
        assert!(user.password_modified());
        assert_eq!(user.password(), "s3cret!");

        user.install_hash("$argon2id$fake".into());
        assert!(!user.password_modified());
        assert_eq!(user.password(), "$argon2id$fake");
    }

    #[test]
    fn test_email_well_formedness() {
        let user = User::builder().email("not-an-email").password("pw").build();
        assert!(user.validate().is_err());

        let user = User::builder().email("a@example.com").password("pw").build();
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_password_never_serialized() {
        let user = User::builder().email("a@example.com").password("pw").build();

        let serialized = serde_yaml::to_string(&user).unwrap();
        assert!(!serialized.contains("pw"));
        assert!(serialized.contains("a@example.com"));
    }
}
