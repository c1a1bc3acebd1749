//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use harvest_app::domain::users::data::Credentials;

use crate::{
    auth::{errors::into_status_error, models::SessionResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Login Handler
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .users
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use harvest_app::domain::users::{UsersServiceError, records::UserUuid};

    use crate::test_helpers::Mocks;

    use super::{
        super::tests::{make_session, make_user},
        *,
    };

    fn make_service(mocks: Mocks) -> Service {
        mocks.public_service(Router::with_path("auth/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let uuid = UserUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_login()
            .once()
            .withf(|credentials| {
                *credentials
                    == Credentials {
                        email: "ada@example.com".to_string(),
                        password: "secret1".to_string(),
                    }
            })
            .return_once(move |_| Ok(make_session(make_user(uuid, "ada@example.com"))));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "ada@example.com", "password": "secret1" }))
            .send(&make_service(mocks))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.user.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_login()
            .once()
            .return_once(|_| Err(UsersServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "ada@example.com", "password": "nope!!" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("Invalid credentials"));

        Ok(())
    }
}
