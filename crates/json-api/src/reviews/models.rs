//! Review Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use harvest_app::domain::reviews::records::{ReviewRecord, ReviewWithAuthor};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub item_uuid: Uuid,

    /// `Product`, `Workshop` or `Event`
    pub item_type: String,

    /// 1 to 5
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into(),
            user_uuid: review.user.into(),
            item_uuid: review.item.into(),
            item_type: review.item_kind.to_string(),
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewAuthor {
    pub name: String,
}

/// A review with its author's display name.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewWithAuthorResponse {
    #[serde(flatten)]
    pub review: ReviewResponse,
    pub user: ReviewAuthor,
}

impl From<ReviewWithAuthor> for ReviewWithAuthorResponse {
    fn from(review: ReviewWithAuthor) -> Self {
        Self {
            review: review.review.into(),
            user: ReviewAuthor {
                name: review.author_name,
            },
        }
    }
}
