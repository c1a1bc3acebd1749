//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::users::{password::PasswordError, token::SessionTokenError};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("User already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is not valid")]
    InvalidCredential,

    #[error("invalid user: {0}")]
    InvalidData(&'static str),

    #[error("password hashing error")]
    Password(#[source] PasswordError),

    #[error("session expiry is out of range")]
    SessionExpiry(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => {
                Self::InvalidData("user data was rejected by the store")
            }
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PasswordError> for UsersServiceError {
    fn from(error: PasswordError) -> Self {
        Self::Password(error)
    }
}

impl From<SessionTokenError> for UsersServiceError {
    fn from(_error: SessionTokenError) -> Self {
        Self::InvalidCredential
    }
}
