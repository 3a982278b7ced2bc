use api::auth::middleware::log_request;
use api::routes::routes;
use api::state::AppState;
use axum::{Router, middleware::from_fn};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use services::sms::transport_from_config;
use std::{error::Error, net::SocketAddr, sync::Arc};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use util::config;
use util::dates::SystemClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    if config::env().eq_ignore_ascii_case("production") && config::jwt_secret() == config::DEV_JWT_SECRET {
        error!("JWT_SECRET must be set in production");
        return Err("JWT_SECRET must be set in production".into());
    }

    let db = db::connect().await?;
    Migrator::up(&db, None).await?;

    let clock = SystemClock::from_config();
    info!(timezone = %config::timezone(), "Hostel clock ready");

    let app_state = AppState::new(db, Arc::new(clock), transport_from_config());
    if let Err(e) = app_state.scheduler().start().await {
        warn!(error = %e, "Reminder scheduler not started");
    }
    let scheduler = app_state.scheduler_handle();

    let app = Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .layer(CorsLayer::very_permissive());

    let addr: SocketAddr = format!("{}:{}", config::host(), config::port()).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_logging(log_file: &str, log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter = EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| EnvFilter::new("api=info,services=info,db=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config::log_to_stdout() {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}
