//! Subscription Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    subscriptions::{errors::into_status_error, models::SubscriptionResponse},
};

/// Subscription Index Handler
///
/// Every subscription, newest first. Admins only.
#[endpoint(
    tags("subscriptions"),
    summary = "List Subscriptions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "All subscriptions"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<SubscriptionResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subscriptions = state
        .app
        .subscriptions
        .list_subscriptions()
        .await
        .map_err(into_status_error)?;

    Ok(Json(subscriptions.into_iter().map(Into::into).collect()))
}
