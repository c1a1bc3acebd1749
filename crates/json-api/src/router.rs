//! App Router

use std::sync::Arc;

use harvest_app::domain::catalog::records::ItemKind;
use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};

use crate::{
    auth, bookings, catalog, external, healthcheck,
    observability::{metrics_handler, request_logging},
    reviews,
    state::State,
    subscriptions,
};

/// Every `/api` route.
pub(crate) fn api_router() -> Router {
    let auth = Router::with_path("auth")
        .push(Router::with_path("signup").post(auth::signup::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::with_path("me")
                .hoop(auth::middleware::handler)
                .get(auth::me::handler),
        );

    ItemKind::ALL
        .into_iter()
        .fold(Router::with_path("api").push(auth), |api, kind| {
            api.push(catalog::router(kind))
        })
        .push(bookings::router())
        .push(reviews::router())
        .push(subscriptions::router())
        .push(external::router())
}

/// The full application: probes, metrics and the API behind the shared hoops.
pub(crate) fn app_router(state: Arc<State>) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .get(healthcheck::banner)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(api_router())
}

#[cfg(test)]
mod tests {
    use harvest_app::domain::{
        catalog::records::CatalogItemUuid,
        subscriptions::SubscriptionsServiceError,
        users::{
            UsersServiceError,
            records::{Identity, Role},
        },
    };
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_ADMIN_UUID, TEST_USER_UUID, make_product};

    use super::*;

    fn expect_token(mocks: &mut Mocks) {
        mocks
            .users
            .expect_authenticate_bearer()
            .returning(|token| match token {
                "user-token" => Ok(Identity {
                    user: TEST_USER_UUID,
                    role: Role::User,
                }),
                "admin-token" => Ok(Identity {
                    user: TEST_ADMIN_UUID,
                    role: Role::Admin,
                }),
                _ => Err(UsersServiceError::InvalidCredential),
            });
    }

    fn product_body() -> serde_json::Value {
        json!({
            "name": "Heirloom Tomatoes",
            "price": 450,
            "image": "tomatoes.jpg",
            "description": "A punnet of mixed heirloom tomatoes"
        })
    }

    #[tokio::test]
    async fn catalog_reads_are_public() -> TestResult {
        let uuid = CatalogItemUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_list_items()
            .once()
            .withf(|kind| *kind == ItemKind::Workshop)
            .return_once(|_| Ok(vec![]));

        mocks
            .catalog
            .expect_get_item()
            .once()
            .withf(move |kind, item| *kind == ItemKind::Product && *item == uuid)
            .return_once(move |_, _| Ok(make_product(uuid)));

        let service = Service::new(app_router(mocks.into_state()));

        let list = TestClient::get("http://example.com/api/workshops")
            .send(&service)
            .await;

        let item = TestClient::get(format!("http://example.com/api/products/{uuid}"))
            .send(&service)
            .await;

        assert_eq!(list.status_code, Some(StatusCode::OK));
        assert_eq!(item.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn catalog_writes_need_a_token() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.catalog.expect_create_item().never();

        let mut res = TestClient::post("http://example.com/api/products")
            .json(&product_body())
            .send(&Service::new(app_router(mocks.into_state())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(res.take_string().await?.contains("No token, authorization denied"));

        Ok(())
    }

    #[tokio::test]
    async fn catalog_writes_need_an_admin() -> TestResult {
        let mut mocks = Mocks::default();

        expect_token(&mut mocks);
        mocks.catalog.expect_create_item().never();
        mocks.catalog.expect_delete_item().never();

        let service = Service::new(app_router(mocks.into_state()));

        let created = TestClient::post("http://example.com/api/products")
            .add_header(AUTHORIZATION, "Bearer user-token", true)
            .json(&product_body())
            .send(&service)
            .await;

        let deleted = TestClient::delete(format!(
            "http://example.com/api/events/{}",
            CatalogItemUuid::new()
        ))
        .add_header(AUTHORIZATION, "Bearer user-token", true)
        .send(&service)
        .await;

        assert_eq!(created.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(deleted.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn admins_can_create_catalog_items() -> TestResult {
        let mut mocks = Mocks::default();

        expect_token(&mut mocks);

        mocks
            .catalog
            .expect_create_item()
            .once()
            .withf(|new| new.kind == ItemKind::Product)
            .return_once(|new| Ok(make_product(new.uuid)));

        let res = TestClient::post("http://example.com/api/products")
            .add_header(AUTHORIZATION, "Bearer admin-token", true)
            .json(&product_body())
            .send(&Service::new(app_router(mocks.into_state())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn admin_listings_reject_regular_users() -> TestResult {
        let mut mocks = Mocks::default();

        expect_token(&mut mocks);
        mocks.bookings.expect_list_all_bookings().never();
        mocks.subscriptions.expect_list_subscriptions().never();

        let service = Service::new(app_router(mocks.into_state()));

        for path in ["/api/bookings", "/api/subscriptions"] {
            let res = TestClient::get(format!("http://example.com{path}"))
                .add_header(AUTHORIZATION, "Bearer user-token", true)
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "{path}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn my_bookings_rejects_an_invalid_token() -> TestResult {
        let mut mocks = Mocks::default();

        expect_token(&mut mocks);
        mocks.bookings.expect_list_my_bookings().never();

        let mut res = TestClient::get("http://example.com/api/bookings/my-bookings")
            .add_header(AUTHORIZATION, "Bearer forged", true)
            .send(&Service::new(app_router(mocks.into_state())))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert!(res.take_string().await?.contains("Token is not valid"));

        Ok(())
    }

    #[tokio::test]
    async fn subscribing_and_reading_reviews_are_public() -> TestResult {
        let item = CatalogItemUuid::new();

        let mut mocks = Mocks::default();

        mocks.users.expect_authenticate_bearer().never();

        mocks
            .reviews
            .expect_list_reviews_for_item()
            .once()
            .return_once(|_| Ok(vec![]));

        mocks
            .subscriptions
            .expect_subscribe()
            .once()
            .return_once(|_| Err(SubscriptionsServiceError::AlreadySubscribed));

        let service = Service::new(app_router(mocks.into_state()));

        let reviews = TestClient::get(format!("http://example.com/api/reviews/{item}"))
            .send(&service)
            .await;

        let subscribed = TestClient::post("http://example.com/api/subscriptions")
            .json(&json!({ "email": "a@x.com" }))
            .send(&service)
            .await;

        assert_eq!(reviews.status_code, Some(StatusCode::OK));
        assert_eq!(subscribed.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
