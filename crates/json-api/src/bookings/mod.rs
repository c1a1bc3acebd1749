//! Bookings

mod errors;
pub(crate) mod handlers;
mod models;

use salvo::Router;

use crate::auth;

pub(crate) use handlers::*;

/// Booking routes. Every route needs a signed-in user; the full listing needs an admin.
pub(crate) fn router() -> Router {
    Router::with_path("bookings")
        .hoop(auth::middleware::handler)
        .post(create::handler)
        .push(Router::with_path("checkout").post(checkout::handler))
        .push(Router::with_path("my-bookings").get(mine::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::admin)
                .get(index::handler),
        )
}
