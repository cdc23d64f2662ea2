//! Error handler for credstore.

use sqlx::Error as SQLxError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::crypto::HashError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Enum representing store-side errors.
///
/// A failed verification is split in two: [`StoreError::WrongPassword`] for
/// a candidate that simply does not match, [`StoreError::CorruptHash`] when
/// the stored hash itself cannot be read. Callers can branch on the former
/// without swallowing the latter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error("email is already registered")]
    EmailTaken,

    #[error("password hashing failed: {0}")]
    Hashing(#[from] HashError),

    #[error("password does not match")]
    WrongPassword,

    #[error("stored password hash is unreadable: {0}")]
    CorruptHash(String),

    #[error("no record matches the requested user")]
    NotFound,

    #[error("SQL request failed: {0}")]
    Sql(#[from] SQLxError),

    #[error("internal error, {details}")]
    Internal { details: String },
}
