//! Reviews

mod errors;
pub(crate) mod handlers;
mod models;

use salvo::Router;

use crate::auth;

pub(crate) use handlers::*;

/// Anyone can read an item's reviews; posting one needs a signed-in user.
pub(crate) fn router() -> Router {
    Router::with_path("reviews")
        .push(Router::with_path("{item}").get(index::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .post(create::handler),
        )
}
