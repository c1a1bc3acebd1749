//! Prometheus metrics: HTTP traffic plus booking and weather counters.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

use harvest_app::domain::catalog::records::ItemKind;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct HarvestMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    bookings_created_total: IntCounterVec,
    weather_lookups_total: IntCounterVec,
}

static METRICS: OnceLock<Option<HarvestMetrics>> = OnceLock::new();

/// How a weather lookup ended, as exported in the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WeatherOutcome {
    Live,
    Demo,
    KeyNotActivated,
    Failed,
}

impl WeatherOutcome {
    const fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
            Self::KeyNotActivated => "key_not_activated",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count bookings that were committed, by item kind.
pub(crate) fn record_bookings<I>(kinds: I)
where
    I: IntoIterator<Item = ItemKind>,
{
    let Some(metrics) = metrics() else {
        return;
    };

    for kind in kinds {
        metrics
            .bookings_created_total
            .with_label_values(&[kind.tag()])
            .inc();
    }
}

pub(crate) fn record_weather_lookup(outcome: WeatherOutcome) {
    if let Some(metrics) = metrics() {
        metrics
            .weather_lookups_total
            .with_label_values(&[outcome.label()])
            .inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static HarvestMetrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

/// Register `metric`, logging and discarding it on failure.
fn register<C>(registry: &Registry, name: &str, metric: Result<C, prometheus::Error>) -> Option<C>
where
    C: Collector + Clone + 'static,
{
    let metric = metric
        .inspect_err(|source| error!("failed to create {name} metric: {source}"))
        .ok()?;

    registry
        .register(Box::new(metric.clone()))
        .inspect_err(|source| error!("failed to register {name} metric: {source}"))
        .ok()?;

    Some(metric)
}

fn build_metrics() -> Option<HarvestMetrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "harvest_json_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "request_duration",
        HistogramVec::new(
            HistogramOpts::new(
                "harvest_json_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "requests_in_flight",
        IntGauge::with_opts(Opts::new(
            "harvest_json_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
    )?;

    let bookings_created_total = register(
        &registry,
        "bookings_created",
        IntCounterVec::new(
            Opts::new(
                "harvest_bookings_created_total",
                "Bookings committed, partitioned by item type.",
            ),
            &["item_type"],
        ),
    )?;

    let weather_lookups_total = register(
        &registry,
        "weather_lookups",
        IntCounterVec::new(
            Opts::new(
                "harvest_weather_lookups_total",
                "Weather proxy lookups partitioned by outcome.",
            ),
            &["outcome"],
        ),
    )?;

    Some(HarvestMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        bookings_created_total,
        weather_lookups_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn metrics_endpoint_exposes_http_and_domain_metrics() -> TestResult {
        observe_request("GET", "/api/products", 200, 0.042);
        observe_request("GET", "/api/products", 500, 0.123);
        record_bookings([ItemKind::Event, ItemKind::Workshop]);
        record_weather_lookup(WeatherOutcome::Demo);

        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        let response = TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await?;

        for name in [
            "harvest_json_http_requests_total",
            "harvest_json_http_request_duration_seconds",
            "harvest_json_http_requests_in_flight",
        ] {
            assert!(response.contains(name), "expected {name} in response");
        }

        assert!(
            response.contains(r#"harvest_bookings_created_total{item_type="event"}"#),
            "expected event bookings counter in response"
        );
        assert!(
            response.contains(r#"harvest_weather_lookups_total{outcome="demo"}"#),
            "expected demo weather counter in response"
        );

        Ok(())
    }

    #[test]
    fn status_codes_group_into_classes() {
        assert_eq!(status_class(201), "2xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(42), "other");
    }
}
