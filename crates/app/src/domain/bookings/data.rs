//! Booking Data

use crate::domain::catalog::records::{CatalogItemUuid, ItemKind};

/// New Booking Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub item: CatalogItemUuid,
    pub item_kind: ItemKind,
}

/// One entry of a client-held cart, as submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: CatalogItemUuid,

    /// Lowercase catalog tag (`product`, `workshop`, `event`).
    pub item_type: String,
}
