//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harvest_app::domain::bookings::data::CartLine;

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    observability::record_bookings,
    state::State,
};

/// One cart entry as held by the client.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemRequest {
    pub item_id: Uuid,

    /// `product`, `workshop` or `event`
    #[serde(rename = "type")]
    pub item_type: String,
}

impl From<CartItemRequest> for CartLine {
    fn from(request: CartItemRequest) -> Self {
        CartLine {
            item: request.item_id.into(),
            item_type: request.item_type,
        }
    }
}

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub items: Vec<CartItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// One booking per distinct cart item
    pub bookings: Vec<BookingResponse>,
}

/// Checkout Handler
///
/// Books every distinct item in the cart. If any item fails nothing is booked.
#[endpoint(
    tags("bookings"),
    summary = "Checkout Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Every cart item booked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, unknown type or duplicate booking"),
        (status_code = StatusCode::NOT_FOUND, description = "A cart item does not exist"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let lines = json.into_inner().items.into_iter().map(Into::into).collect();

    let bookings = state
        .app
        .bookings
        .create_bookings_for_cart(identity.user, lines)
        .await
        .map_err(into_status_error)?;

    record_bookings(bookings.iter().map(|booking| booking.item_kind));

    res.status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use harvest_app::domain::{
        bookings::BookingsServiceError,
        catalog::records::{CatalogItemUuid, ItemKind},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID};

    use super::{super::tests::make_booking, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.user_service(Router::with_path("bookings/checkout").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_passes_cart_through_and_returns_201() -> TestResult {
        let event = CatalogItemUuid::new();
        let product = CatalogItemUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .bookings
            .expect_create_bookings_for_cart()
            .once()
            .withf(move |user, lines| {
                *user == TEST_USER_UUID
                    && *lines
                        == vec![
                            CartLine {
                                item: event,
                                item_type: "event".to_string(),
                            },
                            CartLine {
                                item: product,
                                item_type: "product".to_string(),
                            },
                        ]
            })
            .return_once(move |user, _| {
                Ok(vec![
                    make_booking(user, event, ItemKind::Event),
                    make_booking(user, product, ItemKind::Product),
                ])
            });

        let mut res = TestClient::post("http://example.com/bookings/checkout")
            .json(&json!({
                "items": [
                    { "itemId": event.into_uuid(), "type": "event" },
                    { "itemId": product.into_uuid(), "type": "product" }
                ]
            }))
            .send(&make_service(mocks))
            .await;

        let body: CheckoutResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.bookings.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .bookings
            .expect_create_bookings_for_cart()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::EmptyCart));

        let mut res = TestClient::post("http://example.com/bookings/checkout")
            .json(&json!({ "items": [] }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("Cart is empty"));

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_item_returns_its_status() -> TestResult {
        let missing = CatalogItemUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .bookings
            .expect_create_bookings_for_cart()
            .once()
            .return_once(move |_, _| {
                Err(BookingsServiceError::CheckoutFailed {
                    item: missing,
                    source: Box::new(BookingsServiceError::NotFound),
                })
            });

        let mut res = TestClient::post("http://example.com/bookings/checkout")
            .json(&json!({ "items": [{ "itemId": missing.into_uuid(), "type": "workshop" }] }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(res.take_string().await?.contains(&missing.to_string()));

        Ok(())
    }
}
