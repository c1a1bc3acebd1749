//! Subscribe Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    subscriptions::{errors::into_status_error, models::SubscriptionResponse},
};

/// Subscribe Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscribedResponse {
    pub message: String,
    pub subscription: SubscriptionResponse,
}

/// Subscribe Handler
///
/// Signs an email address up for the newsletter.
#[endpoint(
    tags("subscriptions"),
    summary = "Subscribe",
    responses(
        (status_code = StatusCode::CREATED, description = "Subscribed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or already subscribed email"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SubscribeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubscribedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subscription = state
        .app
        .subscriptions
        .subscribe(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SubscribedResponse {
        message: "Subscribed successfully".to_string(),
        subscription: subscription.into(),
    }))
}
