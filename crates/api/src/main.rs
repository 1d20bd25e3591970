use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use jobq_api::config::ServerConfig;
use jobq_api::router::build_app_router;
use jobq_api::state::AppState;
use jobq_db::PgJobStore;
use jobq_worker::{DispatchQueue, JobRegistry, SimulatedProcessor, WorkerPool, WorkerPoolConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    init_tracing();
    if !dotenv_loaded {
        tracing::warn!("No .env file found, relying on environment variables");
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let pool_config = WorkerPoolConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        workers = pool_config.worker_count,
        queue_capacity = pool_config.queue_capacity,
        processing_delay_ms = pool_config.processing_delay.as_millis() as u64,
        "Loaded configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = jobq_db::create_pool(&database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connection pool created"
    );

    jobq_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    jobq_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Engine ---
    let registry = JobRegistry::new(Arc::new(PgJobStore::new(pool.clone())));
    let queue = Arc::new(DispatchQueue::new(pool_config.queue_capacity));
    let workers = WorkerPool::new(
        registry.clone(),
        Arc::clone(&queue),
        Arc::new(SimulatedProcessor::new(pool_config.processing_delay)),
        pool_config.worker_count,
    )
    .start();

    // --- App state ---
    let state = AppState {
        registry,
        queue,
        config: Arc::new(config.clone()),
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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, draining workers");

    let report = workers
        .shutdown(Duration::from_secs(config.shutdown_timeout_secs))
        .await;
    tracing::info!(
        stranded = report.stranded.len(),
        timed_out = report.timed_out,
        "Worker pool drained"
    );

    pool.close().await;
    tracing::info!("Database connection pool closed");

    tracing::info!("Graceful shutdown complete");
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls filtering; `LOG_FORMAT=json` switches to one JSON
/// object per line.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "jobq_api=debug,jobq_worker=debug,jobq_db=info,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
