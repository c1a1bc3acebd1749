//! Catalog Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Catalog Item UUID
pub type CatalogItemUuid = TypedUuid<CatalogItemRecord>;

/// The three kinds of item offered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Product,
    Workshop,
    Event,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown item kind: {0}")]
pub struct UnknownItemKind(pub String);

impl ItemKind {
    pub const ALL: [Self; 3] = [Self::Product, Self::Workshop, Self::Event];

    /// Lowercase tag used in storage and in client carts.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Workshop => "workshop",
            Self::Event => "event",
        }
    }

    /// Capitalized type name used by booking and review payloads.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Workshop => "Workshop",
            Self::Event => "Event",
        }
    }

    /// Category applied when an item is created without one.
    #[must_use]
    pub const fn default_category(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Workshop => "workshops",
            Self::Event => "events",
        }
    }

    /// Workshops and events are scheduled sessions with a capacity.
    #[must_use]
    pub const fn is_session(self) -> bool {
        matches!(self, Self::Workshop | Self::Event)
    }

    /// Only events keep a running enrollment count as bookings arrive.
    #[must_use]
    pub const fn tracks_enrollment(self) -> bool {
        matches!(self, Self::Event)
    }

    /// Parse a lowercase cart/storage tag (`"event"`).
    ///
    /// # Errors
    ///
    /// Returns an error when the tag is not one of the catalog kinds.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownItemKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| UnknownItemKind(tag.to_string()))
    }

    /// Parse a capitalized type name (`"Event"`).
    ///
    /// # Errors
    ///
    /// Returns an error when the label is not one of the catalog kinds.
    pub fn from_label(label: &str) -> Result<Self, UnknownItemKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .ok_or_else(|| UnknownItemKind(label.to_string()))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_label(value).or_else(|_| Self::from_tag(value))
    }
}

/// Schedule and capacity of a workshop or event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetails {
    pub date: String,
    pub time: String,
    pub location: String,
    pub capacity: u32,
    pub enrolled: u32,
}

/// Attributes that only apply to one kind of item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDetails {
    Product { available: bool },
    Session(SessionDetails),
}

/// Catalog Item Record
#[derive(Debug, Clone)]
pub struct CatalogItemRecord {
    pub uuid: CatalogItemUuid,
    pub kind: ItemKind,
    pub name: String,

    /// Price in pence/cents.
    pub price: u64,
    pub image: String,
    pub description: String,
    pub category: String,
    pub details: ItemDetails,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CatalogItemRecord {
    #[must_use]
    pub fn session(&self) -> Option<&SessionDetails> {
        match &self.details {
            ItemDetails::Session(session) => Some(session),
            ItemDetails::Product { .. } => None,
        }
    }

    #[must_use]
    pub fn enrolled(&self) -> Option<u32> {
        self.session().map(|session| session.enrolled)
    }
}
