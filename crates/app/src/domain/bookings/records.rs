//! Booking Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        catalog::records::{CatalogItemUuid, ItemKind},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Booking UUID
pub type BookingUuid = TypedUuid<BookingRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown booking status: {0}")]
pub struct UnknownBookingStatus(pub String);

impl BookingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownBookingStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownBookingStatus(value.to_string())),
        }
    }
}

/// Booking Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub uuid: BookingUuid,
    pub user: UserUuid,
    pub item: CatalogItemUuid,
    pub item_kind: ItemKind,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

/// A booking together with its owner's contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithUser {
    pub booking: BookingRecord,
    pub user_name: String,
    pub user_email: String,
}
