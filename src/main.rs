//! # Session Auth Server
//!
//! Demo server wiring the model and session-auth middleware into a small
//! username/password application.

use session_auth_middleware::config::Config;
use session_auth_middleware::routes;
use session_auth_middleware::state::AppState;
use time::Duration;
// CORS (Cross-Origin Resource Sharing) - allows a frontend on another origin to call the API
use tower_http::cors::{Any, CorsLayer};
// HTTP request/response tracing for debugging and monitoring
use tower_http::trace::TraceLayer;
// Session management - keeps users logged in across requests
use tower_sessions::{Expiry, SessionManagerLayer};
// SQLite-backed session storage
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// This function:
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Connects to the database and runs migrations
/// 4. Configures HTTP sessions for keeping users logged in
/// 5. Builds the router and starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info level for most crates, debug level for this one.
    // Can be overridden with RUST_LOG.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,session_auth_middleware=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config).await?;
    tracing::info!("Application state initialized");

    // Session data (the user id) lives server side in SQLite; the cookie only
    // carries the session id
    let session_store = SqliteStore::new(app_state.db.clone());
    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::hours(config.session_inactivity_hours)));

    // In production, restrict this to specific origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Layers are processed in reverse order: tracing sees the request first,
    // the session is loaded before the model and auth middleware run
    let app = routes::router(app_state)
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let bind_addr = config.bind_address();
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
