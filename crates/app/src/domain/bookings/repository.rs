//! Bookings Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    bookings::records::{BookingRecord, BookingStatus, BookingUuid, BookingWithUser},
    catalog::records::{CatalogItemUuid, ItemKind},
    users::records::UserUuid,
};

const FIND_BOOKING_SQL: &str = include_str!("sql/find_booking.sql");
const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const LIST_USER_BOOKINGS_SQL: &str = include_str!("sql/list_user_bookings.sql");
const LIST_BOOKINGS_WITH_USERS_SQL: &str = include_str!("sql/list_bookings_with_users.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CatalogItemUuid,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(FIND_BOOKING_SQL)
            .bind(user.into_uuid())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        user: UserUuid,
        item: CatalogItemUuid,
        item_kind: ItemKind,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(booking.into_uuid())
            .bind(user.into_uuid())
            .bind(item.into_uuid())
            .bind(item_kind.tag())
            .bind(BookingStatus::Confirmed.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_bookings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LIST_USER_BOOKINGS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_bookings_with_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BookingWithUser>, sqlx::Error> {
        query_as::<Postgres, BookingWithUser>(LIST_BOOKINGS_WITH_USERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let item_kind: String = row.try_get("item_kind")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            item: CatalogItemUuid::from_uuid(row.try_get("item_uuid")?),
            item_kind: ItemKind::from_tag(&item_kind).map_err(|e| sqlx::Error::ColumnDecode {
                index: "item_kind".to_string(),
                source: Box::new(e),
            })?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BookingWithUser {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            booking: BookingRecord::from_row(row)?,
            user_name: row.try_get("user_name")?,
            user_email: row.try_get("user_email")?,
        })
    }
}
