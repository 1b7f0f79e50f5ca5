use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter, prelude::*};
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{trace::{SdkTracerProvider, Sampler}, Resource};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use tracing_opentelemetry::OpenTelemetryLayer;

use crate::api::cors::{apply_cors, CorsPolicy};
use crate::api::handler::address_check_handler;
use crate::api::AppState;
use crate::config::Config;
use crate::postnl::{AddressProvider, PostNlClient, ProviderError};

/// Install the global subscriber: JSON logs, plus OTLP span export when enabled
///
/// `OTEL_ENABLED` defaults to on inside Lambda, where the collector runs as an extension.
pub fn init_tracing() {
    let in_lambda = env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok();
    let export_spans = env::var("OTEL_ENABLED")
        .map(|v| v == "true")
        .unwrap_or(in_lambda);

    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().json().with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,tower=warn,h2=error,reqwest=warn"))
        );

    if !export_spans {
        subscriber.init();
        return;
    }

    let endpoint = otlp_endpoint(in_lambda);
    match init_opentelemetry(endpoint) {
        Ok(provider) => {
            opentelemetry::global::set_tracer_provider(provider.clone());

            // OpenTelemetryLayer needs a concrete tracer, not the global BoxedTracer
            let tracer = provider.tracer("address-check");
            subscriber.with(OpenTelemetryLayer::new(tracer)).init();

            info!(endpoint, "Exporting address check spans");
        }
        Err(e) => {
            subscriber.init();
            tracing::error!("Span export disabled, OTLP exporter failed to start: {}", e);
        }
    }
}

fn otlp_endpoint(in_lambda: bool) -> &'static str {
    if in_lambda {
        "http://127.0.0.1:4318/v1/traces"
    } else {
        "http://localhost:4318/v1/traces"
    }
}

fn init_opentelemetry(endpoint: &str) -> Result<SdkTracerProvider, Box<dyn std::error::Error>> {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let service_name = env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "address-check".to_string());

    // Fraction of lookups traced, 1% unless overridden
    let sampling_rate = env::var("OTEL_TRACE_SAMPLING_RATE")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.01)
        .clamp(0.0, 1.0);

    let resource = Resource::builder()
        .with_attribute(KeyValue::new("service.name", service_name))
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(Sampler::TraceIdRatioBased(sampling_rate))
        .with_batch_exporter(exporter)
        .build();

    info!(sampling_rate, "OTLP exporter configured");

    Ok(provider)
}

/// Build the router with the real PostNL client
pub fn create_app(config: Config) -> Result<Router, ProviderError> {
    let provider = PostNlClient::from_config(&config)?;
    Ok(create_app_with_provider(config, Arc::new(provider)))
}

/// Build the router around any address provider
pub fn create_app_with_provider(config: Config, provider: Arc<dyn AddressProvider>) -> Router {
    let cors = Arc::new(CorsPolicy::new(config.allowed_origins.clone()));

    let state = AppState {
        config: Arc::new(config),
        provider,
    };

    Router::new()
        // Function URL / API Gateway root
        .route("/", any(address_check_handler))
        .route("/address-check", any(address_check_handler))
        // Path the browser clients were built against
        .route("/.netlify/functions/address-check", any(address_check_handler))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(middleware::from_fn_with_state(cors, apply_cors))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting address check server");

    let config = Config::from_env()?;
    let port = config.port;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
            // Without a signal handler, run until the process is killed
            std::future::pending::<()>().await;
        }
        info!("Shutting down gracefully...");
    };

    let app = create_app(config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
