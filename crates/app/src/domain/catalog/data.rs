//! Catalog Data

use crate::{
    domain::catalog::{
        errors::CatalogServiceError,
        records::{CatalogItemUuid, ItemKind},
    },
    validation::non_blank,
};

/// Largest price the `BIGINT` column holds.
pub const MAX_PRICE: u64 = i64::MAX.unsigned_abs();

/// Largest capacity or enrollment the `INTEGER` columns hold.
pub const MAX_COUNT: u32 = i32::MAX.unsigned_abs();

/// Session attributes supplied by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAttributes {
    pub date: String,
    pub time: String,
    pub location: String,
    pub capacity: u32,

    /// Initial or corrected enrollment; left untouched on update when `None`.
    pub enrolled: Option<u32>,
}

/// Kind-specific attributes supplied by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAttributes {
    Product { available: bool },
    Session(SessionAttributes),
}

/// Editable catalog item attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAttributes {
    pub name: String,
    pub price: u64,
    pub image: String,
    pub description: String,
    pub category: Option<String>,
    pub details: DetailAttributes,
}

/// New Catalog Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogItem {
    pub uuid: CatalogItemUuid,
    pub kind: ItemKind,
    pub attributes: ItemAttributes,
}

/// Catalog Item Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItemUpdate {
    pub attributes: ItemAttributes,
}

impl ItemAttributes {
    /// Check the attributes describe a valid item of `kind`, returning them trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogServiceError::Invalid`] naming the first offending field.
    pub fn validated(self, kind: ItemKind) -> Result<Self, CatalogServiceError> {
        let name = required(&self.name, "name is required")?;
        let image = required(&self.image, "image is required")?;
        let description = required(&self.description, "description is required")?;

        if self.price > MAX_PRICE {
            return Err(CatalogServiceError::Invalid("price is too large"));
        }

        let category = self
            .category
            .as_deref()
            .and_then(non_blank)
            .map_or_else(|| kind.default_category().to_string(), str::to_string);

        let details = match (kind.is_session(), self.details) {
            (false, DetailAttributes::Product { available }) => {
                DetailAttributes::Product { available }
            }
            (true, DetailAttributes::Session(session)) => {
                if session.capacity == 0 {
                    return Err(CatalogServiceError::Invalid(
                        "capacity must be a positive integer",
                    ));
                }

                if session.capacity > MAX_COUNT {
                    return Err(CatalogServiceError::Invalid("capacity is too large"));
                }

                if session.enrolled.is_some_and(|enrolled| enrolled > MAX_COUNT) {
                    return Err(CatalogServiceError::Invalid("enrolled is too large"));
                }

                DetailAttributes::Session(SessionAttributes {
                    date: required(&session.date, "date is required")?,
                    time: required(&session.time, "time is required")?,
                    location: required(&session.location, "location is required")?,
                    capacity: session.capacity,
                    enrolled: session.enrolled,
                })
            }
            (false, DetailAttributes::Session(_)) => {
                return Err(CatalogServiceError::Invalid(
                    "products do not have session details",
                ));
            }
            (true, DetailAttributes::Product { .. }) => {
                return Err(CatalogServiceError::Invalid(
                    "workshops and events need date, time, location and capacity",
                ));
            }
        };

        Ok(Self {
            name,
            price: self.price,
            image,
            description,
            category: Some(category),
            details,
        })
    }
}

fn required(value: &str, message: &'static str) -> Result<String, CatalogServiceError> {
    non_blank(value)
        .map(str::to_string)
        .ok_or(CatalogServiceError::Invalid(message))
}
