//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use harvest_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => StatusError::conflict().brief("Item already exists"),
        CatalogServiceError::NotFound => StatusError::not_found().brief("Item not found"),
        CatalogServiceError::Invalid(reason) => StatusError::bad_request().brief(reason),
        CatalogServiceError::MissingRequiredData | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid item payload")
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
