//! Subscriptions service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::subscriptions::{
        errors::SubscriptionsServiceError,
        records::{SubscriptionRecord, SubscriptionUuid},
        repository::PgSubscriptionsRepository,
    },
    validation::normalise_email,
};

#[derive(Debug, Clone)]
pub struct PgSubscriptionsService {
    db: Db,
    repository: PgSubscriptionsRepository,
}

impl PgSubscriptionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSubscriptionsRepository::new(),
        }
    }
}

#[async_trait]
impl SubscriptionsService for PgSubscriptionsService {
    async fn subscribe(&self, email: &str) -> Result<SubscriptionRecord, SubscriptionsServiceError> {
        let email = normalise_email(email).ok_or(SubscriptionsServiceError::InvalidEmail)?;

        let mut tx = self.db.begin().await?;

        if self
            .repository
            .find_subscription(&mut tx, &email)
            .await?
            .is_some()
        {
            warn!(%email, "duplicate subscription rejected");

            return Err(SubscriptionsServiceError::AlreadySubscribed);
        }

        let created = self
            .repository
            .create_subscription(&mut tx, SubscriptionUuid::new(), &email)
            .await?;

        tx.commit().await?;

        info!(subscription = %created.uuid, "newsletter subscription created");

        Ok(created)
    }

    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, SubscriptionsServiceError> {
        let mut tx = self.db.begin().await?;

        let subscriptions = self.repository.list_subscriptions(&mut tx).await?;

        tx.commit().await?;

        Ok(subscriptions)
    }
}

#[automock]
#[async_trait]
pub trait SubscriptionsService: Send + Sync {
    /// Subscribe an email address to the newsletter.
    async fn subscribe(&self, email: &str) -> Result<SubscriptionRecord, SubscriptionsServiceError>;

    /// Every subscription, newest first.
    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, SubscriptionsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn subscribe_normalises_email() -> TestResult {
        let ctx = TestContext::new().await;

        let subscription = ctx.subscriptions.subscribe("  A@X.com ").await?;

        assert_eq!(subscription.email, "a@x.com");
        assert!(subscription.active);

        Ok(())
    }

    #[tokio::test]
    async fn subscribing_twice_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.subscriptions.subscribe("a@x.com").await?;

        let result = ctx.subscriptions.subscribe("A@x.com").await;

        assert!(
            matches!(result, Err(SubscriptionsServiceError::AlreadySubscribed)),
            "expected AlreadySubscribed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.subscriptions.subscribe("not an email").await;

        assert!(
            matches!(result, Err(SubscriptionsServiceError::InvalidEmail)),
            "expected InvalidEmail, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_subscriptions_is_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.subscriptions.subscribe("first@x.com").await?;
        let second = ctx.subscriptions.subscribe("second@x.com").await?;

        let subscriptions = ctx.subscriptions.list_subscriptions().await?;

        assert_eq!(
            subscriptions.iter().map(|s| s.uuid).collect::<Vec<_>>(),
            vec![second.uuid, first.uuid]
        );

        Ok(())
    }
}
