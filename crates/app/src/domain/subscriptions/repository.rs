//! Subscriptions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::subscriptions::records::{SubscriptionRecord, SubscriptionUuid};

const FIND_SUBSCRIPTION_SQL: &str = include_str!("sql/find_subscription.sql");
const CREATE_SUBSCRIPTION_SQL: &str = include_str!("sql/create_subscription.sql");
const LIST_SUBSCRIPTIONS_SQL: &str = include_str!("sql/list_subscriptions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubscriptionsRepository;

impl PgSubscriptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<SubscriptionRecord>, sqlx::Error> {
        query_as::<Postgres, SubscriptionRecord>(FIND_SUBSCRIPTION_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscription: SubscriptionUuid,
        email: &str,
    ) -> Result<SubscriptionRecord, sqlx::Error> {
        query_as::<Postgres, SubscriptionRecord>(CREATE_SUBSCRIPTION_SQL)
            .bind(subscription.into_uuid())
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_subscriptions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<SubscriptionRecord>, sqlx::Error> {
        query_as::<Postgres, SubscriptionRecord>(LIST_SUBSCRIPTIONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SubscriptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SubscriptionUuid::from_uuid(row.try_get("uuid")?),
            email: row.try_get("email")?,
            active: row.try_get("active")?,
            subscribed_at: row.try_get::<SqlxTimestamp, _>("subscribed_at")?.to_jiff(),
        })
    }
}
