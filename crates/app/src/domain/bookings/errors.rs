//! Bookings service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::catalog::records::CatalogItemUuid;

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error("Item not found")]
    NotFound,

    #[error("You have already booked this item")]
    DuplicateBooking,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Unknown item type: {0}")]
    UnknownItemType(String),

    #[error("checkout failed on item {item}")]
    CheckoutFailed {
        item: CatalogItemUuid,
        #[source]
        source: Box<BookingsServiceError>,
    },

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BookingsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateBooking,
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
