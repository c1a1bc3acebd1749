//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::records::{CatalogItemUuid, ItemKind},
    reviews::{
        data::ValidReview,
        records::{ReviewRecord, ReviewUuid, ReviewWithAuthor},
    },
    users::records::UserUuid,
};

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LIST_ITEM_REVIEWS_SQL: &str = include_str!("sql/list_item_reviews.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        user: UserUuid,
        data: &ValidReview,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(user.into_uuid())
            .bind(data.item.into_uuid())
            .bind(data.item_kind.tag())
            .bind(i16::from(data.rating))
            .bind(&data.comment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_item_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        query_as::<Postgres, ReviewWithAuthor>(LIST_ITEM_REVIEWS_SQL)
            .bind(item.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let item_kind: String = row.try_get("item_kind")?;
        let rating: i16 = row.try_get("rating")?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            item: CatalogItemUuid::from_uuid(row.try_get("item_uuid")?),
            item_kind: ItemKind::from_tag(&item_kind).map_err(|e| sqlx::Error::ColumnDecode {
                index: "item_kind".to_string(),
                source: Box::new(e),
            })?,
            rating: u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
                index: "rating".to_string(),
                source: Box::new(e),
            })?,
            comment: row.try_get("comment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewWithAuthor {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            review: ReviewRecord::from_row(row)?,
            author_name: row.try_get("author_name")?,
        })
    }
}
