//! Subscription Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harvest_app::domain::subscriptions::records::SubscriptionRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionResponse {
    pub uuid: Uuid,

    /// Trimmed and lowercased
    pub email: String,
    pub active: bool,
    pub subscribed_at: String,
}

impl From<SubscriptionRecord> for SubscriptionResponse {
    fn from(subscription: SubscriptionRecord) -> Self {
        Self {
            uuid: subscription.uuid.into(),
            email: subscription.email,
            active: subscription.active,
            subscribed_at: subscription.subscribed_at.to_string(),
        }
    }
}
