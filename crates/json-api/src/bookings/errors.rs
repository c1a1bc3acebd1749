//! Booking Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use harvest_app::domain::bookings::BookingsServiceError;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    match error {
        BookingsServiceError::NotFound => StatusError::not_found().brief("Item not found"),
        BookingsServiceError::DuplicateBooking => {
            StatusError::bad_request().brief("You have already booked this item")
        }
        BookingsServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        BookingsServiceError::UnknownItemType(item_type) => {
            StatusError::bad_request().brief(format!("Unknown item type: {item_type}"))
        }
        BookingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::CheckoutFailed { item, source } => {
            warn!(%item, error = %source, "checkout rolled back");

            let status = into_status_error(*source);

            if status.code.is_server_error() {
                return status;
            }

            let brief = format!("{} (item {item})", status.brief);

            status.brief(brief)
        }
        BookingsServiceError::Sql(source) => {
            error!("booking storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
