//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use harvest_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => StatusError::bad_request().brief("User already exists"),
        UsersServiceError::InvalidCredentials => {
            StatusError::bad_request().brief("Invalid credentials")
        }
        UsersServiceError::InvalidData(reason) => StatusError::bad_request().brief(reason),
        UsersServiceError::InvalidCredential => {
            StatusError::unauthorized().brief("Token is not valid")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::SessionExpiry(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
