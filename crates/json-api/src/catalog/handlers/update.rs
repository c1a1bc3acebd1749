//! Update Catalog Item Handler

use std::sync::Arc;

use harvest_app::domain::catalog::{data::CatalogItemUpdate, records::ItemKind};
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    catalog::{
        errors::into_status_error,
        models::{CatalogItemRequest, CatalogItemResponse},
    },
    extensions::*,
    state::State,
};

/// Update Catalog Item Handler
///
/// Replaces the item's editable attributes. Enrollment is kept unless supplied.
#[endpoint(
    tags("catalog"),
    summary = "Update Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<CatalogItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CatalogItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = *depot.obtain_or_500::<ItemKind>()?;

    let item = state
        .app
        .catalog
        .update_item(
            kind,
            item.into_inner().into(),
            CatalogItemUpdate {
                attributes: json.into_inner().into_attributes(kind),
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
