mod config;
mod routes;
mod telemetry;

use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use config::Config;
use routes::AppState;
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let sentry_guard = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });
    telemetry::init(config.log_format, sentry_guard.is_some())?;

    info!("Hello Snakes!");
    let app = routes::router(Arc::new(AppState::new(&config)));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .wrap_err_with(|| format!("could not listen on port {}", config.port))?;
    info!(
        port = config.port,
        strategy = %config.strategy,
        legality = %config.legality,
        "Listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
