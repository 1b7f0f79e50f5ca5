use address_check::api::server;

#[cfg(not(feature = "lambda"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run_server().await
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    // Initialize tracing with OpenTelemetry support
    server::init_tracing();

    let config = address_check::Config::from_env()?;
    let app = server::create_app(config)?;

    // The router is a tower service, lambda_http adapts API Gateway / function URL events to it
    lambda_http::run(app).await
}
