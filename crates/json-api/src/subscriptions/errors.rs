//! Subscription Errors

use salvo::http::StatusError;
use tracing::error;

use harvest_app::domain::subscriptions::SubscriptionsServiceError;

pub(crate) fn into_status_error(error: SubscriptionsServiceError) -> StatusError {
    match error {
        SubscriptionsServiceError::AlreadySubscribed => {
            StatusError::bad_request().brief("Email already subscribed")
        }
        SubscriptionsServiceError::InvalidEmail => {
            StatusError::bad_request().brief("A valid email is required")
        }
        SubscriptionsServiceError::Sql(source) => {
            error!("subscription storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
