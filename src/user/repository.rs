//! Handle database requests.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::{Result, StoreError};
use crate::user::User;

/// Persistence port for [`User`] records.
///
/// Implementations enforce email uniqueness: an insert or update that would
/// duplicate another record's email fails with [`StoreError::EmailTaken`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, user: &User) -> Result<()>;

    /// Find a record using `id` field.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;

    /// Find a record using `email` field.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Update an existing record.
    async fn update(&self, user: &User) -> Result<()>;

    /// Delete a record.
    async fn delete(&self, user_id: &str) -> Result<()>;
}

/// [`UserRepository`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new [`PgUserRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StoreError::EmailTaken
    } else {
        StoreError::Sql(err)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO users (id, email, password, created_at)
                VALUES ($1, $2, $3, $4)"#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(user.password())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, password, created_at FROM users WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, password, created_at FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let result =
            sqlx::query(r#"UPDATE users SET email = $1, password = $2 WHERE id = $3"#)
                .bind(&user.email)
                .bind(user.password())
                .bind(&user.id)
                .execute(&self.pool)
                .await
                .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
