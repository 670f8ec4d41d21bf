use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use condo_api::bootstrap::{ensure_admin, AdminSeed};
use condo_api::config::ServerConfig;
use condo_api::routes::build_app_router;
use condo_api::state::AppState;
use condo_db::repositories::SessionRepo;
use condo_db::DbPool;
use condo_events::{
    ActivityPersistence, BulkMailer, EmailConfig, EventBus, LogTransport, MailTransport,
    SmtpTransport,
};

/// How often spent and expired refresh sessions are deleted.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = condo_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    condo_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    condo_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- First-run admin ---
    match AdminSeed::from_env() {
        Some(seed) => {
            ensure_admin(&pool, &seed)
                .await
                .expect("Failed to provision the bootstrap admin");
        }
        None => tracing::debug!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap"),
    }

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let persistence_handle = tokio::spawn(ActivityPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));
    tracing::info!("Activity persistence started");

    // --- Session sweep ---
    let sweep_handle = tokio::spawn(sweep_sessions(pool.clone(), SESSION_SWEEP_INTERVAL));

    // --- Mail ---
    let transport: Arc<dyn MailTransport> = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(smtp_host = %email_config.smtp_host, "SMTP transport configured");
            Arc::new(SmtpTransport::new(&email_config).expect("Invalid SMTP configuration"))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, broadcast emails will only be logged");
            Arc::new(LogTransport)
        }
    };

    // --- App state ---
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        mailer: BulkMailer::new(transport),
    };

    // --- Router ---
    let app = build_app_router(state, &config).expect("Invalid server configuration");

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
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweep_handle.abort();

    // The router (and its AppState clone) is gone; dropping the last sender
    // closes the channel and lets persistence drain and exit.
    drop(event_bus);
    if tokio::time::timeout(shutdown_timeout, persistence_handle)
        .await
        .is_err()
    {
        tracing::warn!("Activity persistence did not finish before the shutdown timeout");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Delete spent and expired refresh sessions at startup and then every
/// `period` until aborted.
async fn sweep_sessions(pool: DbPool, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        match SessionRepo::purge_stale(&pool).await {
            Ok(0) => {}
            Ok(purged) => tracing::info!(purged, "Purged stale sessions"),
            Err(e) => tracing::warn!(error = %e, "Session sweep failed"),
        }
    }
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to one JSON
/// object per line.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "condo_api=debug,condo_events=info,tower_http=debug".into());

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
