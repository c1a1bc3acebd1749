//! Delete Catalog Item Handler

use std::sync::Arc;

use harvest_app::domain::catalog::records::ItemKind;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemDeletedResponse {
    pub message: String,
}

/// Delete Catalog Item Handler
#[endpoint(
    tags("catalog"),
    summary = "Delete Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ItemDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = *depot.obtain_or_500::<ItemKind>()?;

    state
        .app
        .catalog
        .delete_item(kind, item.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ItemDeletedResponse {
        message: format!("{kind} deleted"),
    }))
}
