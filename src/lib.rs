//! Credstore is a lightweight credential record store: persisted
//! email/password records, hashed at the write boundary, verified at login
//! time.

#[forbid(unsafe_code)]
#[deny(missing_docs, unused_mut)]
mod crypto;
mod database;
pub mod error;
pub mod telemetry;
mod user;

pub mod config;

pub use crypto::{HashError, PasswordManager, VerifyError};
pub use database::Database;
pub use error::{Result, StoreError};
pub use user::{
    MemoryRepository, Missing, PgUserRepository, Present, User, UserBuilder,
    UserRepository, UserService,
};

/// Initialize a PostgreSQL-backed [`UserService`] from `config.yaml`.
pub async fn initialize_store()
-> std::result::Result<UserService<PgUserRepository>, Box<dyn std::error::Error>>
{
    // read configuration file. let it in memory.
    let config = config::Configuration::default().read();

    let db = match config.postgres {
        Some(ref config) => {
            database::Database::new(
                &config.address,
                &config
                    .username
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &config
                    .password
                    .clone()
                    .unwrap_or(database::DEFAULT_CREDENTIALS.into()),
                &config
                    .database
                    .clone()
                    .unwrap_or(database::DEFAULT_DATABASE_NAME.into()),
                config.pool_size.unwrap_or(database::DEFAULT_POOL_SIZE),
            )
            .await?
        },
        None => {
            tracing::error!("missing `postgres` entry on `config.yaml` file");
            return Err("missing `postgres` entry on `config.yaml` file".into());
        },
    };

    // execute migrations scripts on start.
    db.migrate().await?;

    let hasher = crypto::PasswordManager::new(config.argon2.clone())?;

    Ok(UserService::new(
        PgUserRepository::new(db.postgres.clone()),
        hasher,
    ))
}
