//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::catalog::{
    data::{DetailAttributes, ItemAttributes},
    records::{CatalogItemRecord, CatalogItemUuid, ItemDetails, ItemKind, SessionDetails},
};

const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const LOCK_ITEM_SQL: &str = include_str!("sql/lock_item.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const UPDATE_ITEM_SQL: &str = include_str!("sql/update_item.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");
const INCREMENT_ENROLLMENT_SQL: &str = include_str!("sql/increment_enrollment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ItemKind,
    ) -> Result<Vec<CatalogItemRecord>, sqlx::Error> {
        query_as::<Postgres, CatalogItemRecord>(LIST_ITEMS_SQL)
            .bind(kind.tag())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ItemKind,
        item: CatalogItemUuid,
    ) -> Result<CatalogItemRecord, sqlx::Error> {
        query_as::<Postgres, CatalogItemRecord>(GET_ITEM_SQL)
            .bind(kind.tag())
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an item and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ItemKind,
        item: CatalogItemUuid,
    ) -> Result<Option<CatalogItemRecord>, sqlx::Error> {
        query_as::<Postgres, CatalogItemRecord>(LOCK_ITEM_SQL)
            .bind(kind.tag())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
        kind: ItemKind,
        attributes: &ItemAttributes,
    ) -> Result<CatalogItemRecord, sqlx::Error> {
        let columns = ItemColumns::try_from(attributes)?;

        query_as::<Postgres, CatalogItemRecord>(CREATE_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(kind.tag())
            .bind(columns.name)
            .bind(columns.price)
            .bind(columns.image)
            .bind(columns.description)
            .bind(columns.category)
            .bind(columns.available)
            .bind(columns.date)
            .bind(columns.time)
            .bind(columns.location)
            .bind(columns.capacity)
            .bind(columns.enrolled.or(columns.capacity.map(|_| 0)))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ItemKind,
        item: CatalogItemUuid,
        attributes: &ItemAttributes,
    ) -> Result<CatalogItemRecord, sqlx::Error> {
        let columns = ItemColumns::try_from(attributes)?;

        query_as::<Postgres, CatalogItemRecord>(UPDATE_ITEM_SQL)
            .bind(kind.tag())
            .bind(item.into_uuid())
            .bind(columns.name)
            .bind(columns.price)
            .bind(columns.image)
            .bind(columns.description)
            .bind(columns.category)
            .bind(columns.available)
            .bind(columns.date)
            .bind(columns.time)
            .bind(columns.location)
            .bind(columns.capacity)
            .bind(columns.enrolled)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: ItemKind,
        item: CatalogItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(kind.tag())
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Add one to an event's enrollment in place, returning the new count.
    pub(crate) async fn increment_enrollment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        event: CatalogItemUuid,
    ) -> Result<u32, sqlx::Error> {
        let enrolled: i32 = query_scalar(INCREMENT_ENROLLMENT_SQL)
            .bind(event.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u32::try_from(enrolled).map_err(|e| column_decode("enrolled", e))
    }
}

/// Item attributes flattened into nullable table columns.
struct ItemColumns<'a> {
    name: &'a str,
    price: i64,
    image: &'a str,
    description: &'a str,
    category: Option<&'a str>,
    available: Option<bool>,
    date: Option<&'a str>,
    time: Option<&'a str>,
    location: Option<&'a str>,
    capacity: Option<i32>,
    enrolled: Option<i32>,
}

impl<'a> TryFrom<&'a ItemAttributes> for ItemColumns<'a> {
    type Error = sqlx::Error;

    fn try_from(attributes: &'a ItemAttributes) -> Result<Self, Self::Error> {
        let price = i64::try_from(attributes.price).map_err(|e| column_decode("price", e))?;

        let mut columns = Self {
            name: &attributes.name,
            price,
            image: &attributes.image,
            description: &attributes.description,
            category: attributes.category.as_deref(),
            available: None,
            date: None,
            time: None,
            location: None,
            capacity: None,
            enrolled: None,
        };

        match &attributes.details {
            DetailAttributes::Product { available } => columns.available = Some(*available),
            DetailAttributes::Session(session) => {
                columns.date = Some(&session.date);
                columns.time = Some(&session.time);
                columns.location = Some(&session.location);
                columns.capacity = Some(
                    i32::try_from(session.capacity).map_err(|e| column_decode("capacity", e))?,
                );
                columns.enrolled = session
                    .enrolled
                    .map(i32::try_from)
                    .transpose()
                    .map_err(|e| column_decode("enrolled", e))?;
            }
        }

        Ok(columns)
    }
}

fn column_decode(
    column: &str,
    error: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

fn non_negative(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| column_decode(column, e))
}

impl<'r> FromRow<'r, PgRow> for CatalogItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind_tag: String = row.try_get("kind")?;
        let kind = ItemKind::from_tag(&kind_tag).map_err(|e| column_decode("kind", e))?;

        let price_i64: i64 = row.try_get("price")?;
        let price = u64::try_from(price_i64).map_err(|e| column_decode("price", e))?;

        let details = if kind.is_session() {
            ItemDetails::Session(SessionDetails {
                date: row.try_get("date")?,
                time: row.try_get("time")?,
                location: row.try_get("location")?,
                capacity: non_negative(row, "capacity")?,
                enrolled: non_negative(row, "enrolled")?,
            })
        } else {
            ItemDetails::Product {
                available: row.try_get("available")?,
            }
        };

        Ok(Self {
            uuid: CatalogItemUuid::from_uuid(row.try_get("uuid")?),
            kind,
            name: row.try_get("name")?,
            price,
            image: row.try_get("image")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            details,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
