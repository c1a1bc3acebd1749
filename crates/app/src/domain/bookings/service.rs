//! Bookings service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashSet;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        bookings::{
            data::{CartLine, NewBooking},
            errors::BookingsServiceError,
            records::{BookingRecord, BookingUuid, BookingWithUser},
            repository::PgBookingsRepository,
        },
        catalog::{
            records::{CatalogItemUuid, ItemKind, UnknownItemKind},
            repository::PgCatalogRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgBookingsService {
    db: Db,
    repository: PgBookingsRepository,
    catalog: PgCatalogRepository,
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBookingsRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    /// Book one item inside `tx`: existence check, duplicate check, insert, then
    /// the enrollment increment for events.
    async fn book_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError> {
        self.catalog
            .lock_item(tx, booking.item_kind, booking.item)
            .await?
            .ok_or(BookingsServiceError::NotFound)?;

        if self
            .repository
            .find_booking(tx, user, booking.item)
            .await?
            .is_some()
        {
            warn!(%user, item = %booking.item, "duplicate booking rejected");

            return Err(BookingsServiceError::DuplicateBooking);
        }

        let created = self
            .repository
            .create_booking(tx, BookingUuid::new(), user, booking.item, booking.item_kind)
            .await
            .map_err(BookingsServiceError::from)
            .inspect_err(|error| {
                if matches!(error, BookingsServiceError::DuplicateBooking) {
                    warn!(%user, item = %booking.item, "concurrent duplicate booking rejected");
                }
            })?;

        if booking.item_kind.tracks_enrollment() {
            let enrolled = self.catalog.increment_enrollment(tx, booking.item).await?;

            info!(event = %booking.item, enrolled, "event enrollment incremented");
        }

        Ok(created)
    }
}

/// Map cart lines to bookings, keeping the first occurrence of each item.
fn distinct_bookings(lines: &[CartLine]) -> Result<Vec<NewBooking>, BookingsServiceError> {
    let mut seen = FxHashSet::<CatalogItemUuid>::default();
    let mut bookings = Vec::with_capacity(lines.len());

    for line in lines {
        let item_kind = ItemKind::from_tag(&line.item_type)
            .map_err(|UnknownItemKind(tag)| BookingsServiceError::UnknownItemType(tag))?;

        if seen.insert(line.item) {
            bookings.push(NewBooking {
                item: line.item,
                item_kind,
            });
        }
    }

    Ok(bookings)
}

#[async_trait]
impl BookingsService for PgBookingsService {
    async fn create_booking(
        &self,
        user: UserUuid,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.book_item(&mut tx, user, booking).await?;

        tx.commit().await?;

        info!(
            booking = %created.uuid,
            %user,
            item = %created.item,
            kind = created.item_kind.tag(),
            "booking created"
        );

        Ok(created)
    }

    async fn create_bookings_for_cart(
        &self,
        user: UserUuid,
        lines: Vec<CartLine>,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        if lines.is_empty() {
            return Err(BookingsServiceError::EmptyCart);
        }

        // Rows are locked in item order so concurrent checkouts cannot deadlock.
        let mut bookings: Vec<(usize, NewBooking)> =
            distinct_bookings(&lines)?.into_iter().enumerate().collect();

        bookings.sort_unstable_by_key(|(_, booking)| booking.item);

        let mut tx = self.db.begin().await?;
        let mut created = Vec::with_capacity(bookings.len());

        for (position, booking) in bookings {
            let record = self
                .book_item(&mut tx, user, booking)
                .await
                .map_err(|source| BookingsServiceError::CheckoutFailed {
                    item: booking.item,
                    source: Box::new(source),
                })?;

            created.push((position, record));
        }

        tx.commit().await?;

        created.sort_unstable_by_key(|(position, _)| *position);

        let created: Vec<BookingRecord> = created.into_iter().map(|(_, record)| record).collect();

        info!(%user, bookings = created.len(), "cart checked out");

        Ok(created)
    }

    async fn list_my_bookings(
        &self,
        user: UserUuid,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.repository.list_user_bookings(&mut tx, user).await?;

        tx.commit().await?;

        Ok(bookings)
    }

    async fn list_all_bookings(&self) -> Result<Vec<BookingWithUser>, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let bookings = self.repository.list_bookings_with_users(&mut tx).await?;

        tx.commit().await?;

        Ok(bookings)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Book a single catalog item for `user`. Booking an event raises its enrollment by one.
    async fn create_booking(
        &self,
        user: UserUuid,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Book every distinct item in a cart. Either all bookings are created or none are.
    async fn create_bookings_for_cart(
        &self,
        user: UserUuid,
        lines: Vec<CartLine>,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError>;

    /// The caller's own bookings, newest first.
    async fn list_my_bookings(
        &self,
        user: UserUuid,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError>;

    /// Every booking with its owner's name and email, newest first.
    async fn list_all_bookings(&self) -> Result<Vec<BookingWithUser>, BookingsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{bookings::records::BookingStatus, catalog::CatalogService},
        test::{
            TestContext,
            helpers::{create_event, create_product, create_user, create_workshop},
        },
    };

    use super::*;

    fn cart_line(item: CatalogItemUuid, item_type: &str) -> CartLine {
        CartLine {
            item,
            item_type: item_type.to_string(),
        }
    }

    #[tokio::test]
    async fn booking_an_event_increments_enrollment() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let event = create_event(&ctx, 200, Some(150)).await?;

        let booking = ctx
            .bookings
            .create_booking(
                user.uuid,
                NewBooking {
                    item: event.uuid,
                    item_kind: ItemKind::Event,
                },
            )
            .await?;

        assert_eq!(booking.user, user.uuid);
        assert_eq!(booking.item, event.uuid);
        assert_eq!(booking.item_kind, ItemKind::Event);
        assert_eq!(booking.status, BookingStatus::Confirmed);

        let event = ctx.catalog.get_item(ItemKind::Event, event.uuid).await?;

        assert_eq!(event.enrolled(), Some(151));

        Ok(())
    }

    #[tokio::test]
    async fn booking_a_workshop_leaves_enrollment_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let workshop = create_workshop(&ctx, 20, Some(12)).await?;

        let booking = ctx
            .bookings
            .create_booking(
                user.uuid,
                NewBooking {
                    item: workshop.uuid,
                    item_kind: ItemKind::Workshop,
                },
            )
            .await?;

        assert_eq!(booking.item_kind, ItemKind::Workshop);
        assert_eq!(booking.status, BookingStatus::Confirmed);

        let workshop = ctx.catalog.get_item(ItemKind::Workshop, workshop.uuid).await?;

        assert_eq!(workshop.enrolled(), Some(12));

        Ok(())
    }

    #[tokio::test]
    async fn second_identical_booking_is_a_duplicate() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let event = create_event(&ctx, 200, None).await?;
        let booking = NewBooking {
            item: event.uuid,
            item_kind: ItemKind::Event,
        };

        ctx.bookings.create_booking(user.uuid, booking).await?;

        let result = ctx.bookings.create_booking(user.uuid, booking).await;

        assert!(
            matches!(result, Err(BookingsServiceError::DuplicateBooking)),
            "expected DuplicateBooking, got {result:?}"
        );

        let event = ctx.catalog.get_item(ItemKind::Event, event.uuid).await?;

        assert_eq!(event.enrolled(), Some(1));
        assert_eq!(ctx.bookings.list_my_bookings(user.uuid).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn booking_a_missing_item_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let product = create_product(&ctx, "Honey", 800).await?;

        // Right uuid, wrong kind.
        let result = ctx
            .bookings
            .create_booking(
                user.uuid,
                NewBooking {
                    item: product.uuid,
                    item_kind: ItemKind::Event,
                },
            )
            .await;

        assert!(
            matches!(result, Err(BookingsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_duplicate_bookings_create_one_booking() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let event = create_event(&ctx, 200, None).await?;
        let booking = NewBooking {
            item: event.uuid,
            item_kind: ItemKind::Event,
        };

        let (first, second) = tokio::join!(
            ctx.bookings.create_booking(user.uuid, booking),
            ctx.bookings.create_booking(user.uuid, booking),
        );

        let (won, lost) = match (first, second) {
            (Ok(won), Err(lost)) | (Err(lost), Ok(won)) => (won, lost),
            other => return Err(format!("exactly one booking should succeed: {other:?}").into()),
        };

        assert_eq!(won.item, event.uuid);
        assert!(
            matches!(lost, BookingsServiceError::DuplicateBooking),
            "expected DuplicateBooking, got {lost:?}"
        );

        let event = ctx.catalog.get_item(ItemKind::Event, event.uuid).await?;

        assert_eq!(event.enrolled(), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_books_each_distinct_item() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let event = create_event(&ctx, 200, None).await?;
        let workshop = create_workshop(&ctx, 20, None).await?;
        let product = create_product(&ctx, "Honey", 800).await?;

        let bookings = ctx
            .bookings
            .create_bookings_for_cart(
                user.uuid,
                vec![
                    cart_line(event.uuid, "event"),
                    cart_line(workshop.uuid, "workshop"),
                    cart_line(event.uuid, "event"),
                    cart_line(product.uuid, "product"),
                ],
            )
            .await?;

        let kinds: Vec<ItemKind> = bookings.iter().map(|b| b.item_kind).collect();

        assert_eq!(
            kinds,
            vec![ItemKind::Event, ItemKind::Workshop, ItemKind::Product]
        );

        let event = ctx.catalog.get_item(ItemKind::Event, event.uuid).await?;

        assert_eq!(event.enrolled(), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_keeps_cart_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let first = create_event(&ctx, 50, None).await?;
        let second = create_event(&ctx, 50, None).await?;

        let bookings = ctx
            .bookings
            .create_bookings_for_cart(
                user.uuid,
                vec![cart_line(second.uuid, "event"), cart_line(first.uuid, "event")],
            )
            .await?;

        assert_eq!(
            bookings.iter().map(|b| b.item).collect::<Vec<_>>(),
            vec![second.uuid, first.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn opposite_order_checkouts_both_succeed() -> TestResult {
        let ctx = TestContext::new().await;
        let ada = create_user(&ctx, "Ada", "ada@example.com").await?;
        let grace = create_user(&ctx, "Grace", "grace@example.com").await?;
        let a = create_event(&ctx, 50, None).await?;
        let b = create_event(&ctx, 50, None).await?;

        let (ada_cart, grace_cart) = tokio::join!(
            ctx.bookings.create_bookings_for_cart(
                ada.uuid,
                vec![cart_line(a.uuid, "event"), cart_line(b.uuid, "event")],
            ),
            ctx.bookings.create_bookings_for_cart(
                grace.uuid,
                vec![cart_line(b.uuid, "event"), cart_line(a.uuid, "event")],
            ),
        );

        assert_eq!(ada_cart?.len(), 2);
        assert_eq!(grace_cart?.len(), 2);

        for event in [a.uuid, b.uuid] {
            let event = ctx.catalog.get_item(ItemKind::Event, event).await?;

            assert_eq!(event.enrolled(), Some(2));
        }

        Ok(())
    }

    #[tokio::test]
    async fn failed_checkout_rolls_back_every_booking() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;
        let event = create_event(&ctx, 200, Some(10)).await?;
        let missing = CatalogItemUuid::new();

        let result = ctx
            .bookings
            .create_bookings_for_cart(
                user.uuid,
                vec![cart_line(event.uuid, "event"), cart_line(missing, "workshop")],
            )
            .await;

        let Err(BookingsServiceError::CheckoutFailed { item, source }) = &result else {
            return Err(format!("expected CheckoutFailed, got {result:?}").into());
        };

        assert_eq!(*item, missing);
        assert!(matches!(**source, BookingsServiceError::NotFound));

        assert!(ctx.bookings.list_my_bookings(user.uuid).await?.is_empty());

        let event = ctx.catalog.get_item(ItemKind::Event, event.uuid).await?;

        assert_eq!(event.enrolled(), Some(10));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_empty_cart_and_unknown_types() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "Ada", "ada@example.com").await?;

        let empty = ctx.bookings.create_bookings_for_cart(user.uuid, vec![]).await;

        assert!(matches!(empty, Err(BookingsServiceError::EmptyCart)));

        let unknown = ctx
            .bookings
            .create_bookings_for_cart(user.uuid, vec![cart_line(CatalogItemUuid::new(), "Event")])
            .await;

        assert!(
            matches!(&unknown, Err(BookingsServiceError::UnknownItemType(tag)) if tag == "Event"),
            "expected UnknownItemType, got {unknown:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_my_bookings_only_returns_callers_bookings_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let ada = create_user(&ctx, "Ada", "ada@example.com").await?;
        let grace = create_user(&ctx, "Grace", "grace@example.com").await?;
        let first = create_product(&ctx, "Honey", 800).await?;
        let second = create_product(&ctx, "Jam", 500).await?;

        for item in [first.uuid, second.uuid] {
            ctx.bookings
                .create_booking(
                    ada.uuid,
                    NewBooking {
                        item,
                        item_kind: ItemKind::Product,
                    },
                )
                .await?;
        }

        ctx.bookings
            .create_booking(
                grace.uuid,
                NewBooking {
                    item: first.uuid,
                    item_kind: ItemKind::Product,
                },
            )
            .await?;

        let bookings = ctx.bookings.list_my_bookings(ada.uuid).await?;

        assert!(bookings.iter().all(|b| b.user == ada.uuid));
        assert_eq!(
            bookings.iter().map(|b| b.item).collect::<Vec<_>>(),
            vec![second.uuid, first.uuid]
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_all_bookings_includes_owner_details() -> TestResult {
        let ctx = TestContext::new().await;
        let ada = create_user(&ctx, "Ada", "ada@example.com").await?;
        let product = create_product(&ctx, "Honey", 800).await?;

        ctx.bookings
            .create_booking(
                ada.uuid,
                NewBooking {
                    item: product.uuid,
                    item_kind: ItemKind::Product,
                },
            )
            .await?;

        let bookings = ctx.bookings.list_all_bookings().await?;

        assert_eq!(bookings.len(), 1);

        let booking = bookings.first().ok_or("missing booking")?;

        assert_eq!(booking.user_name, "Ada");
        assert_eq!(booking.user_email, "ada@example.com");

        Ok(())
    }

    #[test]
    fn distinct_bookings_keeps_first_occurrence() -> TestResult {
        let a = CatalogItemUuid::new();
        let b = CatalogItemUuid::new();

        let bookings = distinct_bookings(&[
            cart_line(a, "event"),
            cart_line(b, "product"),
            cart_line(a, "event"),
        ])?;

        assert_eq!(
            bookings,
            vec![
                NewBooking {
                    item: a,
                    item_kind: ItemKind::Event
                },
                NewBooking {
                    item: b,
                    item_kind: ItemKind::Product
                },
            ]
        );

        Ok(())
    }
}
