//! Catalog Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harvest_app::domain::catalog::{
    data::{DetailAttributes, ItemAttributes, SessionAttributes},
    records::{CatalogItemRecord, ItemDetails, ItemKind},
};

/// Catalog item payload used for both create and update.
///
/// Products read `available`; workshops and events read the session fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogItemRequest {
    pub name: String,

    /// The price in pence/cents
    pub price: u64,
    pub image: String,
    pub description: String,

    /// Defaults to the collection name
    #[serde(default)]
    pub category: Option<String>,

    /// Products only, defaults to `true`
    #[serde(default)]
    pub available: Option<bool>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub capacity: Option<u32>,

    /// Seeds or corrects the enrollment count
    #[serde(default)]
    pub enrolled: Option<u32>,
}

impl CatalogItemRequest {
    pub(crate) fn into_attributes(self, kind: ItemKind) -> ItemAttributes {
        let details = if kind.is_session() {
            DetailAttributes::Session(SessionAttributes {
                date: self.date.unwrap_or_default(),
                time: self.time.unwrap_or_default(),
                location: self.location.unwrap_or_default(),
                capacity: self.capacity.unwrap_or_default(),
                enrolled: self.enrolled,
            })
        } else {
            DetailAttributes::Product {
                available: self.available.unwrap_or(true),
            }
        };

        ItemAttributes {
            name: self.name,
            price: self.price,
            image: self.image,
            description: self.description,
            category: self.category,
            details,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CatalogItemResponse {
    /// The unique identifier of the item
    pub uuid: Uuid,

    /// `Product`, `Workshop` or `Event`
    pub kind: String,
    pub name: String,

    /// The price in pence/cents
    pub price: u64,
    pub image: String,
    pub description: String,
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled: Option<u32>,

    /// The date and time the item was created
    pub created_at: String,

    /// The date and time the item was last updated
    pub updated_at: String,
}

impl From<CatalogItemRecord> for CatalogItemResponse {
    fn from(item: CatalogItemRecord) -> Self {
        let mut response = CatalogItemResponse {
            uuid: item.uuid.into(),
            kind: item.kind.to_string(),
            name: item.name,
            price: item.price,
            image: item.image,
            description: item.description,
            category: item.category,
            available: None,
            date: None,
            time: None,
            location: None,
            capacity: None,
            enrolled: None,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        };

        match item.details {
            ItemDetails::Product { available } => response.available = Some(available),
            ItemDetails::Session(session) => {
                response.date = Some(session.date);
                response.time = Some(session.time);
                response.location = Some(session.location);
                response.capacity = Some(session.capacity);
                response.enrolled = Some(session.enrolled);
            }
        }

        response
    }
}
