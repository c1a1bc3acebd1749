//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        data::{CatalogItemUpdate, NewCatalogItem},
        errors::CatalogServiceError,
        records::{CatalogItemRecord, CatalogItemUuid, ItemKind},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_items(&self, kind: ItemKind) -> Result<Vec<CatalogItemRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_items(&mut tx, kind).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_item(
        &self,
        kind: ItemKind,
        item: CatalogItemUuid,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_item(&mut tx, kind, item).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_item(
        &self,
        item: NewCatalogItem,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        let attributes = item.attributes.validated(item.kind)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_item(&mut tx, item.uuid, item.kind, &attributes)
            .await?;

        tx.commit().await?;

        info!(item = %created.uuid, kind = created.kind.tag(), "catalog item created");

        Ok(created)
    }

    async fn update_item(
        &self,
        kind: ItemKind,
        item: CatalogItemUuid,
        update: CatalogItemUpdate,
    ) -> Result<CatalogItemRecord, CatalogServiceError> {
        let attributes = update.attributes.validated(kind)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_item(&mut tx, kind, item, &attributes)
            .await?;

        tx.commit().await?;

        info!(item = %updated.uuid, kind = kind.tag(), "catalog item updated");

        Ok(updated)
    }

    async fn delete_item(
        &self,
        kind: ItemKind,
        item: CatalogItemUuid,
    ) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_item(&mut tx, kind, item).await?;

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%item, kind = kind.tag(), "catalog item deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves every item of the given kind, oldest first.
    async fn list_items(&self, kind: ItemKind) -> Result<Vec<CatalogItemRecord>, CatalogServiceError>;

    /// Retrieve a single item.
    async fn get_item(
        &self,
        kind: ItemKind,
        item: CatalogItemUuid,
    ) -> Result<CatalogItemRecord, CatalogServiceError>;

    /// Creates a new item. Session enrollment starts at zero unless supplied.
    async fn create_item(
        &self,
        item: NewCatalogItem,
    ) -> Result<CatalogItemRecord, CatalogServiceError>;

    /// Replaces an item's editable attributes.
    async fn update_item(
        &self,
        kind: ItemKind,
        item: CatalogItemUuid,
        update: CatalogItemUpdate,
    ) -> Result<CatalogItemRecord, CatalogServiceError>;

    /// Deletes an item.
    async fn delete_item(
        &self,
        kind: ItemKind,
        item: CatalogItemUuid,
    ) -> Result<(), CatalogServiceError>;
}
