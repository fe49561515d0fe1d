use certificate_engine::ValidationPolicy;
use certstore_server::{create_app, CertStoreServer, ServerConfig};
use clap::Parser;
use error_common::{CertStoreError, Result};
use std::{env, net::SocketAddr};
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// CertStore HTTP Server
#[derive(Parser, Debug)]
#[command(name = "certstore-server")]
#[command(about = "Certificate and private key record HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long, env = "CERTSTORE_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, env = "CERTSTORE_PORT", default_value = "8080")]
    port: u16,

    /// Request timeout in seconds
    #[arg(long, env = "CERTSTORE_REQUEST_TIMEOUT", default_value = "30")]
    request_timeout: u64,

    /// Largest accepted request body in bytes
    #[arg(long, env = "CERTSTORE_MAX_BODY_BYTES", default_value = "1048576")]
    max_body_bytes: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting CertStore HTTP server");

    let policy = ValidationPolicy::from_env()
        .map_err(|e| CertStoreError::ConfigError(e.to_string()))?;
    info!(
        verify_chain = policy.verify_chain,
        min_rsa_bits = policy.min_rsa_bits,
        min_ec_bits = policy.min_ec_bits,
        "Validation policy loaded"
    );

    let config = ServerConfig {
        request_timeout: args.request_timeout,
        max_body_bytes: args.max_body_bytes,
        ..ServerConfig::default()
    };
    let app = create_app(CertStoreServer::new(config, policy));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| CertStoreError::ConfigError(format!("Invalid bind address: {}", e)))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CertStoreError::NetworkError(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("CertStore server running on http://{}", addr);
    info!("Health check available at: http://{}/health", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| CertStoreError::ServerError(format!("HTTP server error: {}", e)))?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "certstore_server={level},certificate_engine={level},database_layer={level},tower_http=info"
        )
        .into()
    });

    let json = env::var("CERTSTORE_LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_level(true),
            )
            .init();
    }
}
