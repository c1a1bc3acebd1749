//! Signup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use harvest_app::domain::users::{data::NewUser, records::UserUuid};

use crate::{
    auth::{errors::into_status_error, models::SessionResponse},
    extensions::*,
    state::State,
};

/// Signup Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    pub name: String,
    pub email: String,

    /// At least 6 characters
    pub password: String,
}

impl From<SignupRequest> for NewUser {
    fn from(request: SignupRequest) -> Self {
        NewUser {
            uuid: UserUuid::new(),
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Signup Handler
///
/// Registers a regular user and signs them in.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or user already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .users
        .signup(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use harvest_app::domain::users::UsersServiceError;

    use crate::test_helpers::Mocks;

    use super::{
        super::tests::{make_session, make_user},
        *,
    };

    fn make_service(mocks: Mocks) -> Service {
        mocks.public_service(Router::with_path("auth/signup").post(handler))
    }

    #[tokio::test]
    async fn test_signup_returns_201_with_token() -> TestResult {
        let uuid = UserUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_signup()
            .once()
            .withf(|user| {
                user.name == "Ada" && user.email == "ada@example.com" && user.password == "secret1"
            })
            .return_once(move |_| Ok(make_session(make_user(uuid, "ada@example.com"))));

        let mut res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "secret1" }))
            .send(&make_service(mocks))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.token, "uh_v1_token.secret");
        assert_eq!(body.user.uuid, uuid.into_uuid());
        assert_eq!(body.user.role, "user");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_signup()
            .once()
            .return_once(|_| Err(UsersServiceError::AlreadyExists));

        let mut res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "secret1" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("User already exists"));

        Ok(())
    }

    #[tokio::test]
    async fn test_short_password_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.users.expect_signup().once().return_once(|_| {
            Err(UsersServiceError::InvalidData(
                "password must be at least 6 characters",
            ))
        });

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "123" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
