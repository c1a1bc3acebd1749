//! Create Catalog Item Handler

use std::sync::Arc;

use harvest_app::domain::catalog::{
    data::NewCatalogItem,
    records::{CatalogItemUuid, ItemKind},
};
use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    catalog::{
        collection,
        errors::into_status_error,
        models::{CatalogItemRequest, CatalogItemResponse},
    },
    extensions::*,
    state::State,
};

/// Create Catalog Item Handler
#[endpoint(
    tags("catalog"),
    summary = "Create Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CatalogItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CatalogItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = *depot.obtain_or_500::<ItemKind>()?;

    let item = state
        .app
        .catalog
        .create_item(NewCatalogItem {
            uuid: CatalogItemUuid::new(),
            kind,
            attributes: json.into_inner().into_attributes(kind),
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/api/{}/{}", collection(kind), item.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
