//! Weather Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use harvest_app::domain::weather::WeatherServiceError;

use crate::{
    extensions::*,
    external::{
        errors::into_status_error,
        models::{KeyNotActivatedResponse, WeatherBody},
    },
    observability::{WeatherOutcome, record_weather_lookup},
    state::State,
};

const KEY_ACTIVATION_HINT: &str =
    "New API keys can take 10 minutes to 2 hours to activate. Please wait and try again later.";

/// Weather Handler
///
/// Current conditions for a city, or demo data when no provider key is configured.
#[endpoint(
    tags("external"),
    summary = "Current Weather",
    responses(
        (status_code = StatusCode::OK, description = "Current conditions"),
        (status_code = StatusCode::BAD_REQUEST, description = "City is required"),
        (status_code = StatusCode::NOT_FOUND, description = "City not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Weather provider failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Provider key not active yet, with demo fallback"),
    ),
)]
pub(crate) async fn handler(
    city: QueryParam<String, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WeatherBody>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let city = city.into_inner().unwrap_or_default();

    match state.app.weather.current_weather(&city).await {
        Ok(report) => {
            record_weather_lookup(if report.demo {
                WeatherOutcome::Demo
            } else {
                WeatherOutcome::Live
            });

            Ok(Json(WeatherBody::Report(report.into())))
        }
        Err(WeatherServiceError::KeyNotActivated { fallback }) => {
            record_weather_lookup(WeatherOutcome::KeyNotActivated);

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            Ok(Json(WeatherBody::KeyNotActivated(KeyNotActivatedResponse {
                message: "Weather API key is not activated yet".to_string(),
                error: KEY_ACTIVATION_HINT.to_string(),
                fallback: fallback.into(),
            })))
        }
        Err(error) => {
            if !matches!(error, WeatherServiceError::MissingCity) {
                record_weather_lookup(WeatherOutcome::Failed);
            }

            Err(into_status_error(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use harvest_app::domain::weather::records::{DEMO_MESSAGE, WeatherReport};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{external::models::WeatherResponse, test_helpers::Mocks};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.public_service(Router::with_path("external/weather").get(handler))
    }

    #[tokio::test]
    async fn test_demo_report_returns_200() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .weather
            .expect_current_weather()
            .once()
            .withf(|city| city == "Colombo")
            .return_once(|city| {
                Ok(WeatherReport {
                    message: Some(DEMO_MESSAGE.to_string()),
                    ..WeatherReport::demo(city)
                })
            });

        let mut res = TestClient::get("http://example.com/external/weather?city=Colombo")
            .send(&make_service(mocks))
            .await;

        let body: WeatherResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.city, "Colombo");
        assert_eq!(body.weather, "Sunny");
        assert!(body.demo);
        assert_eq!(body.message.as_deref(), Some(DEMO_MESSAGE));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_city_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .weather
            .expect_current_weather()
            .once()
            .withf(|city| city.is_empty())
            .return_once(|_| Err(WeatherServiceError::MissingCity));

        let mut res = TestClient::get("http://example.com/external/weather")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("City is required"));

        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_key_returns_503_with_fallback() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .weather
            .expect_current_weather()
            .once()
            .return_once(|city| {
                Err(WeatherServiceError::KeyNotActivated {
                    fallback: WeatherReport::demo(city),
                })
            });

        let mut res = TestClient::get("http://example.com/external/weather?city=Kandy")
            .send(&make_service(mocks))
            .await;

        let body: KeyNotActivatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(body.fallback.city, "Kandy");
        assert!(body.fallback.demo);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_city_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .weather
            .expect_current_weather()
            .once()
            .return_once(|_| Err(WeatherServiceError::CityNotFound));

        let res = TestClient::get("http://example.com/external/weather?city=Atlantis")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_502() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .weather
            .expect_current_weather()
            .once()
            .return_once(|_| Err(WeatherServiceError::Upstream(500)));

        let res = TestClient::get("http://example.com/external/weather?city=Colombo")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
