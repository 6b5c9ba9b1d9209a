//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use habit_tracker::inbound::http::health::HealthState;
use habit_tracker::inbound::http::session_config::{BuildMode, session_settings_from_env};
use habit_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, ShutdownListener, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let database_url = settings.database_url()?.to_owned();
    let bind_addr = settings.bind_addr()?;
    let calendar = settings.calendar()?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    if settings.run_migrations {
        let applied = run_pending_migrations(&database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        info!(applied, "database schema up to date");
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .wrap_err("failed to build database pool")?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        pool,
    )
    .with_calendar(calendar);

    let shutdown = ShutdownListener::install().wrap_err("failed to install signal handlers")?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    let handle = server.handle();
    info!(%bind_addr, "listening");

    let shutdown_health = health_state.clone();
    actix_web::rt::spawn(async move {
        match shutdown.recv().await {
            Ok(signal) => info!(?signal, "shutdown requested"),
            Err(e) => {
                warn!(error = %e, "failed to listen for shutdown signal");
                return;
            }
        }
        shutdown_health.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await.wrap_err("server terminated with an error")
}
