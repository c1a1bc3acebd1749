//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        catalog::records::CatalogItemUuid,
        reviews::{
            data::NewReview,
            errors::ReviewsServiceError,
            records::{ReviewRecord, ReviewUuid, ReviewWithAuthor},
            repository::PgReviewsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn post_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let review = review.validated().inspect_err(|error| {
            warn!(%user, %error, "review rejected");
        })?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_review(&mut tx, ReviewUuid::new(), user, &review)
            .await?;

        tx.commit().await?;

        info!(
            review = %created.uuid,
            %user,
            item = %created.item,
            rating = created.rating,
            "review posted"
        );

        Ok(created)
    }

    async fn list_reviews_for_item(
        &self,
        item: CatalogItemUuid,
    ) -> Result<Vec<ReviewWithAuthor>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_item_reviews(&mut tx, item).await?;

        tx.commit().await?;

        Ok(reviews)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Record a review. The rating and comment are validated before anything is stored.
    async fn post_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Reviews of a single item with their authors' names, newest first.
    async fn list_reviews_for_item(
        &self,
        item: CatalogItemUuid,
    ) -> Result<Vec<ReviewWithAuthor>, ReviewsServiceError>;
}
