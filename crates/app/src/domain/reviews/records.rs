//! Review Records

use jiff::Timestamp;

use crate::{
    domain::{
        catalog::records::{CatalogItemUuid, ItemKind},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub user: UserUuid,
    pub item: CatalogItemUuid,
    pub item_kind: ItemKind,

    /// Between 1 and 5 inclusive.
    pub rating: u8,
    pub comment: String,
    pub created_at: Timestamp,
}

/// A review with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWithAuthor {
    pub review: ReviewRecord,
    pub author_name: String,
}
