//! OpenTelemetry tracer provider setup.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(
            config.otel_exporter_otlp_timeout_seconds,
        ))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

/// Honour upstream sampling decisions, otherwise sample by trace id ratio.
fn sampler(sample_ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
        sample_ratio.clamp(0.0, 1.0),
    )))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use opentelemetry::{Key, Value};
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        observability: ObservabilityConfig,
    }

    fn ratio_of(sampler: Sampler) -> Option<f64> {
        let Sampler::ParentBased(inner) = sampler else {
            return None;
        };

        match *inner {
            Sampler::TraceIdRatioBased(ratio) => Some(ratio),
            _ => None,
        }
    }

    #[test]
    fn sample_ratio_is_clamped_to_unit_range() {
        assert_eq!(ratio_of(sampler(1.5)), Some(1.0));
        assert_eq!(ratio_of(sampler(-0.2)), Some(0.0));
        assert_eq!(ratio_of(sampler(0.25)), Some(0.25));
    }

    #[test]
    fn resource_names_the_service() -> TestResult {
        let harness = Harness::try_parse_from([
            "harvest-json",
            "--otel-service-name",
            "harvest-json-staging",
        ])?;

        let resource = resource(&harness.observability);

        assert_eq!(
            resource.get(&Key::new("service.name")),
            Some(Value::from("harvest-json-staging"))
        );

        Ok(())
    }
}
