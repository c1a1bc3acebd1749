//! Create Booking Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use harvest_app::domain::{bookings::data::NewBooking, catalog::records::ItemKind};

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    observability::record_bookings,
    state::State,
};

/// Create Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookingRequest {
    pub item_id: Uuid,

    /// `Product`, `Workshop` or `Event`
    pub item_type: String,
}

/// Create Booking Handler
///
/// Books one catalog item for the caller. Booking an event raises its enrollment.
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Already booked or invalid payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let request = json.into_inner();

    // An unrecognised type can never name a stored item.
    let item_kind = request.item_type.parse::<ItemKind>().map_err(|error| {
        warn!(user = %identity.user, %error, "booking for unknown item type");

        StatusError::not_found().brief("Item not found")
    })?;

    let booking = state
        .app
        .bookings
        .create_booking(
            identity.user,
            NewBooking {
                item: request.item_id.into(),
                item_kind,
            },
        )
        .await
        .map_err(into_status_error)?;

    record_bookings([booking.item_kind]);

    res.status_code(StatusCode::CREATED);

    Ok(Json(booking.into()))
}
