//! Catalog: products, workshops and events.

mod errors;
pub(crate) mod handlers;
mod models;

use harvest_app::domain::catalog::records::ItemKind;
use salvo::{Router, affix_state::inject};

use crate::auth;

pub(crate) use handlers::*;

/// Collection path segment for a kind, e.g. `workshops`.
pub(crate) const fn collection(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Product => "products",
        ItemKind::Workshop => "workshops",
        ItemKind::Event => "events",
    }
}

/// Routes for one catalog collection. Reads are public, writes are admin only.
pub(crate) fn router(kind: ItemKind) -> Router {
    Router::with_path(collection(kind))
        .hoop(inject(kind))
        .get(index::handler)
        .push(Router::with_path("{item}").get(get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .hoop(auth::middleware::admin)
                .post(create::handler)
                .push(
                    Router::with_path("{item}")
                        .put(update::handler)
                        .delete(delete::handler),
                ),
        )
}
