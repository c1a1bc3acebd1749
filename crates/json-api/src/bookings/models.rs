//! Booking Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harvest_app::domain::bookings::records::{BookingRecord, BookingWithUser};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    pub uuid: Uuid,

    /// The user who made the booking
    pub user_uuid: Uuid,

    /// The booked catalog item
    pub item_uuid: Uuid,

    /// `Product`, `Workshop` or `Event`
    pub item_type: String,

    /// `confirmed` or `cancelled`
    pub status: String,
    pub created_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(booking: BookingRecord) -> Self {
        Self {
            uuid: booking.uuid.into(),
            user_uuid: booking.user.into(),
            item_uuid: booking.item.into(),
            item_type: booking.item_kind.to_string(),
            status: booking.status.to_string(),
            created_at: booking.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingOwner {
    pub name: String,
    pub email: String,
}

/// A booking with its owner's contact details.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingWithUserResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    pub user: BookingOwner,
}

impl From<BookingWithUser> for BookingWithUserResponse {
    fn from(booking: BookingWithUser) -> Self {
        Self {
            booking: booking.booking.into(),
            user: BookingOwner {
                name: booking.user_name,
                email: booking.user_email,
            },
        }
    }
}
