use std::net::SocketAddr;
use std::sync::Arc;

use thermoscan_core::storage::UploadStore;
use thermoscan_core::thermal::{PythonThermalAnalyzer, ThermalAnalyzer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thermoscan_api::config::ServerConfig;
use thermoscan_api::router::{build_app_router, build_cors_layer};
use thermoscan_api::state::AppState;
use thermoscan_api::thermal::ThermalService;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thermoscan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    build_cors_layer(&config).expect("Invalid CORS_ORIGINS");
    if config.request_timeout_secs <= config.analysis.timeout.as_secs() {
        tracing::warn!(
            request_timeout_secs = config.request_timeout_secs,
            analysis_timeout_secs = config.analysis.timeout.as_secs(),
            "Request timeout does not exceed the analysis timeout",
        );
    }

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = thermoscan_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    thermoscan_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    thermoscan_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Upload storage ---
    let uploads = UploadStore::new(&config.upload_dir);
    uploads
        .ensure_root()
        .await
        .expect("Failed to create upload directory");
    tracing::info!(dir = %config.upload_dir.display(), "Upload directory ready");

    // --- Thermal analysis ---
    let analyzer: Arc<dyn ThermalAnalyzer> =
        Arc::new(PythonThermalAnalyzer::new(config.analysis.clone()));
    tracing::info!(
        python = %config.analysis.python_bin,
        script = %config.analysis.script_name,
        base_dir = %config.analysis.base_dir.display(),
        timeout_secs = config.analysis.timeout.as_secs(),
        "Thermal analyzer configured",
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        uploads: uploads.clone(),
        thermal: Arc::new(ThermalService::new(analyzer, uploads)),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
