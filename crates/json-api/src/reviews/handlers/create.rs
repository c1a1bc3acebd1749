//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harvest_app::domain::{catalog::records::ItemKind, reviews::data::NewReview};

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewResponse},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReviewRequest {
    pub item_id: Uuid,

    /// `Product`, `Workshop` or `Event`
    pub item_type: String,

    /// 1 to 5
    pub rating: i64,
    pub comment: String,
}

/// Create Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Post Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review posted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid rating, comment or item type"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let request = json.into_inner();

    let item_kind = request
        .item_type
        .parse::<ItemKind>()
        .or_400("Invalid item type")?;

    let review = state
        .app
        .reviews
        .post_review(
            identity.user,
            NewReview {
                item: request.item_id.into(),
                item_kind,
                rating: request.rating,
                comment: request.comment,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}
