//! External widgets: weather proxy and map settings.

mod errors;
pub(crate) mod handlers;
mod models;

use salvo::Router;

pub(crate) use handlers::*;

pub(crate) fn router() -> Router {
    Router::with_path("external")
        .push(Router::with_path("weather").get(weather::handler))
        .push(Router::with_path("map-config").get(map_config::handler))
}
