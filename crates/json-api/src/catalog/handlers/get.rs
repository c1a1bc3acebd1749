//! Get Catalog Item Handler

use std::sync::Arc;

use harvest_app::domain::catalog::records::ItemKind;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    catalog::{errors::into_status_error, models::CatalogItemResponse},
    extensions::*,
    state::State,
};

/// Get Catalog Item Handler
#[endpoint(
    tags("catalog"),
    summary = "Get Item",
    responses(
        (status_code = StatusCode::OK, description = "Catalog item"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CatalogItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = *depot.obtain_or_500::<ItemKind>()?;

    let item = state
        .app
        .catalog
        .get_item(kind, item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
