//! Test Helpers

use crate::{
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            data::{DetailAttributes, ItemAttributes, NewCatalogItem, SessionAttributes},
            records::{CatalogItemRecord, CatalogItemUuid, ItemKind},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        name: name.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
    }
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    name: &str,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users.create_user(new_user(name, email), Role::User).await
}

pub(crate) fn session_attributes(name: &str, capacity: u32, enrolled: Option<u32>) -> ItemAttributes {
    ItemAttributes {
        name: name.to_string(),
        price: 2_500,
        image: "session.jpg".to_string(),
        description: "A hands-on session".to_string(),
        category: None,
        details: DetailAttributes::Session(SessionAttributes {
            date: "2026-11-14".to_string(),
            time: "10:00".to_string(),
            location: "Community Garden".to_string(),
            capacity,
            enrolled,
        }),
    }
}

async fn create_session_item(
    ctx: &TestContext,
    kind: ItemKind,
    capacity: u32,
    enrolled: Option<u32>,
) -> Result<CatalogItemRecord, CatalogServiceError> {
    ctx.catalog
        .create_item(NewCatalogItem {
            uuid: CatalogItemUuid::new(),
            kind,
            attributes: session_attributes(kind.label(), capacity, enrolled),
        })
        .await
}

pub(crate) async fn create_event(
    ctx: &TestContext,
    capacity: u32,
    enrolled: Option<u32>,
) -> Result<CatalogItemRecord, CatalogServiceError> {
    create_session_item(ctx, ItemKind::Event, capacity, enrolled).await
}

pub(crate) async fn create_workshop(
    ctx: &TestContext,
    capacity: u32,
    enrolled: Option<u32>,
) -> Result<CatalogItemRecord, CatalogServiceError> {
    create_session_item(ctx, ItemKind::Workshop, capacity, enrolled).await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<CatalogItemRecord, CatalogServiceError> {
    ctx.catalog
        .create_item(NewCatalogItem {
            uuid: CatalogItemUuid::new(),
            kind: ItemKind::Product,
            attributes: ItemAttributes {
                name: name.to_string(),
                price,
                image: "product.jpg".to_string(),
                description: "Grown locally".to_string(),
                category: None,
                details: DetailAttributes::Product { available: true },
            },
        })
        .await
}
