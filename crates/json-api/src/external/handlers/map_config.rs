//! Map Config Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, external::models::MapConfigResponse, state::State};

/// Map Config Handler
///
/// Public settings for the embedded map.
#[endpoint(tags("external"), summary = "Map Config")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MapConfigResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    Ok(Json(state.app.weather.map_config().into()))
}
