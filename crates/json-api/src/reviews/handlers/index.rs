//! Item Reviews Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewWithAuthorResponse},
    state::State,
};

/// Item Reviews Handler
///
/// Reviews of one catalog item with their authors' names, newest first.
#[endpoint(tags("reviews"), summary = "List Item Reviews")]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<ReviewWithAuthorResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .list_reviews_for_item(item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}
