use std::path::PathBuf;
use std::sync::Arc;

use airwaves_api::{AppConfig, AppState, create_app};
use airwaves_engine::HttpBucketLister;
use clap::Parser;

/// Command line arguments for the airwaves server
#[derive(Parser, Debug)]
#[command(name = "airwaves")]
#[command(about = "ATC audio playlist and streaming service")]
struct Args {
    /// Path to the configuration JSON file
    #[arg(short, long)]
    config: PathBuf,

    /// Port to bind the server to
    #[arg(short, long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt().pretty().init();

    // Load configuration from JSON file
    let config_content = tokio::fs::read_to_string(&args.config).await.map_err(|e| {
        format!(
            "Failed to read config file '{}': {}",
            args.config.display(),
            e
        )
    })?;

    let config: AppConfig = serde_json::from_str(&config_content).map_err(|e| {
        format!(
            "Failed to parse config file '{}': {}",
            args.config.display(),
            e
        )
    })?;

    tracing::info!(
        "Loaded configuration from {}: {} airports",
        args.config.display(),
        config.airports.len()
    );
    if config.cdn_origin.is_none() {
        tracing::warn!("No CDN origin configured, the stream proxy will reject requests");
    }
    if config.listing_endpoint.is_none() {
        tracing::warn!("No listing endpoint configured, playlists will always be generated");
    }

    // Create application state with the HTTP-backed lister
    let lister = Arc::new(HttpBucketLister::new(
        reqwest::Client::new(),
        config.listing_endpoint.clone(),
    ));
    let state = AppState::new(config, lister);

    // Build our application with routes
    let app = create_app(state);

    // Run our app with hyper
    let bind_addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", bind_addr, e))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
