//! Catalog Index Handler

use std::sync::Arc;

use harvest_app::domain::catalog::records::ItemKind;
use salvo::prelude::*;

use crate::{
    catalog::{errors::into_status_error, models::CatalogItemResponse},
    extensions::*,
    state::State,
};

/// Catalog Index Handler
///
/// Returns every item in the collection, oldest first.
#[endpoint(tags("catalog"), summary = "List Items")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CatalogItemResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let kind = *depot.obtain_or_500::<ItemKind>()?;

    let items = state
        .app
        .catalog
        .list_items(kind)
        .await
        .map_err(into_status_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}
