//! Test helpers.

use std::sync::Arc;

use harvest_app::{
    context::AppContext,
    domain::{
        bookings::MockBookingsService,
        catalog::{
            MockCatalogService,
            records::{CatalogItemRecord, CatalogItemUuid, ItemDetails, ItemKind, SessionDetails},
        },
        reviews::MockReviewsService,
        subscriptions::MockSubscriptionsService,
        users::{
            MockUsersService,
            records::{Identity, Role, UserUuid},
        },
        weather::MockWeatherService,
    },
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::max());

/// One mock per service. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) catalog: MockCatalogService,
    pub(crate) users: MockUsersService,
    pub(crate) bookings: MockBookingsService,
    pub(crate) reviews: MockReviewsService,
    pub(crate) subscriptions: MockSubscriptionsService,
    pub(crate) weather: MockWeatherService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            users: Arc::new(self.users),
            bookings: Arc::new(self.bookings),
            reviews: Arc::new(self.reviews),
            subscriptions: Arc::new(self.subscriptions),
            weather: Arc::new(self.weather),
        })
    }

    /// Serve `route` without an authenticated caller.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as a regular signed-in user.
    pub(crate) fn user_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }

    /// Serve `route` as a signed-in administrator.
    pub(crate) fn admin_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_admin)
                .push(route),
        )
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        user: TEST_USER_UUID,
        role: Role::User,
    });
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity {
        user: TEST_ADMIN_UUID,
        role: Role::Admin,
    });
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn make_product(uuid: CatalogItemUuid) -> CatalogItemRecord {
    CatalogItemRecord {
        uuid,
        kind: ItemKind::Product,
        name: "Heirloom Tomatoes".to_string(),
        price: 450,
        image: "tomatoes.jpg".to_string(),
        description: "A punnet of mixed heirloom tomatoes".to_string(),
        category: "products".to_string(),
        details: ItemDetails::Product { available: true },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_event(uuid: CatalogItemUuid, capacity: u32, enrolled: u32) -> CatalogItemRecord {
    CatalogItemRecord {
        uuid,
        kind: ItemKind::Event,
        name: "Harvest Festival".to_string(),
        price: 1_500,
        image: "festival.jpg".to_string(),
        description: "Seasonal market and music".to_string(),
        category: "events".to_string(),
        details: ItemDetails::Session(SessionDetails {
            date: "2026-10-24".to_string(),
            time: "10:00".to_string(),
            location: "Town Square".to_string(),
            capacity,
            enrolled,
        }),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
