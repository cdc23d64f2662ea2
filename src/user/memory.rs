//! In-memory record store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::user::{User, UserRepository};

/// [`UserRepository`] backed by a process-local map, enforcing the same
/// email uniqueness contract as the SQL store.
///
/// Used by the test suite; also fits ephemeral embedding.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryRepository {
    /// Create a new empty [`MemoryRepository`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.users.read().expect("users lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn insert(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().expect("users lock poisoned");

        // Email uniqueness is case-sensitive exact match.
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::EmailTaken);
        }

        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let users = self.users.read().expect("users lock poisoned");

        Ok(users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().expect("users lock poisoned");

        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().expect("users lock poisoned");

        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }

        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::EmailTaken);
        }

        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        let mut users = self.users.write().expect("users lock poisoned");

        users.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::builder().email(email).password("pw").build()
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let repo = MemoryRepository::new();

        repo.insert(&user("a@example.com")).await.unwrap();
        let err = repo.insert(&user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_uniqueness_is_case_sensitive() {
        let repo = MemoryRepository::new();

        repo.insert(&user("a@example.com")).await.unwrap();
        repo.insert(&user("A@example.com")).await.unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_update_rejects_taken_email() {
        let repo = MemoryRepository::new();

        repo.insert(&user("a@example.com")).await.unwrap();
        let mut second = user("b@example.com");
        repo.insert(&second).await.unwrap();

        second.email = "a@example.com".into();
        let err = repo.update(&second).await.unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));
    }

    #[tokio::test]
    async fn test_update_unknown_record() {
        let repo = MemoryRepository::new();

        let err = repo.update(&user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = MemoryRepository::new();

        let record = user("a@example.com");
        repo.insert(&record).await.unwrap();
        repo.delete(&record.id).await.unwrap();
        repo.delete(&record.id).await.unwrap();
        assert!(repo.is_empty());
    }
}
