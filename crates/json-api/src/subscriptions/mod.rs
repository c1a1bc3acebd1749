//! Newsletter Subscriptions

mod errors;
pub(crate) mod handlers;
mod models;

use salvo::Router;

use crate::auth;

pub(crate) use handlers::*;

/// Anyone can subscribe; only admins can list subscribers.
pub(crate) fn router() -> Router {
    Router::with_path("subscriptions")
        .post(create::handler)
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .hoop(auth::middleware::admin)
                .get(index::handler),
        )
}
