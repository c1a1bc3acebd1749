//! Subscription Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Subscription UUID
pub type SubscriptionUuid = TypedUuid<SubscriptionRecord>;

/// Subscription Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRecord {
    pub uuid: SubscriptionUuid,

    /// Trimmed and lowercased.
    pub email: String,
    pub active: bool,
    pub subscribed_at: Timestamp,
}
