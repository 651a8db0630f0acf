use std::sync::Arc;

use card_craft::config::AppConfig;
use card_craft::gemini_client::GeminiClient;
use card_craft::{build_router, AppState, MarketingCardFlow};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Configuration - Gemini AI: ✅ (API prefix: {:?})", config.api_prefix);

    let gemini_client = Arc::new(GeminiClient::new(config.gemini.clone()));
    tracing::info!("Initializing Gemini AI client ({})...", gemini_client.model());

    let card_flow = MarketingCardFlow::new(gemini_client);
    tracing::info!("🪄 Marketing card flow ready (provider: {})", card_flow.provider_name());

    let shared_state = Arc::new(AppState::new(card_flow));
    let app = build_router(shared_state, &config.api_prefix);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("❌ Failed to bind {}: {}", config.bind_addr(), e);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(addr) => tracing::info!(
            "🚀 Server running on http://{}{}",
            addr,
            if config.api_prefix.is_empty() { "/" } else { config.api_prefix.as_str() }
        ),
        Err(e) => tracing::warn!("Could not read local address: {}", e),
    }

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!("❌ Server error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("👋 Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, finishing in-flight requests...");
}

// Production-grade logging configuration
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Get log level from environment or default to INFO for production
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,card_craft=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,card_craft=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        // JSON logging for production (easier for log aggregation)
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("🃏 CardCraft starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Build mode: {}",
        if cfg!(debug_assertions) { "development" } else { "production" }
    );
    tracing::info!("Log level: {}", log_level);

    Ok(())
}
