//! OpenTelemetry tracer provider setup.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::{ServerConfig, observability::ObservabilityConfig};

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &ServerConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let otel = &config.observability;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otel.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(otel.otel_exporter_otlp_timeout_seconds))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            otel.otel_trace_sample_ratio,
        ))))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(build_resource(otel))
        .with_batch_exporter(exporter)
        .build())
}

fn build_resource(otel: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(otel.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", otel.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                otel.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use opentelemetry::{Key, Value};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn resource_carries_service_identity() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--token-secret",
            "0123456789abcdef0123456789abcdef",
            "--otel-service-name",
            "storefront-json-test",
            "--otel-deployment-environment",
            "staging",
        ])?;

        let resource = build_resource(&config.observability);

        assert_eq!(
            resource.get(&Key::from_static_str("service.name")),
            Some(Value::from("storefront-json-test"))
        );
        assert_eq!(
            resource.get(&Key::from_static_str("deployment.environment.name")),
            Some(Value::from("staging"))
        );

        Ok(())
    }
}
