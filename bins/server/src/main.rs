//! Roda Bem dashboard server
//!
//! Serves the dashboard API over an in-memory demo data source.

mod demo;

use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rodabem_api::{AppState, create_router};
use rodabem_core::dashboard::DashboardController;
use rodabem_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rodabem=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!(
        settle_delay_ms = config.dashboard.settle_delay_ms,
        retry_attempts = config.retry.max_attempts,
        "Configuration loaded"
    );

    let source = Arc::new(demo::source(Utc::now()));
    let controller = Arc::new(DashboardController::new(source, &config));
    let view = controller.load().await;
    info!(
        period = %view.panel.period,
        unread = view.unread_count,
        activities = view.activity.events.len(),
        "Dashboard loaded"
    );
    controller.spawn_live_updates().await;

    let state = AppState {
        controller,
        config: Arc::new(config.clone()),
    };
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
