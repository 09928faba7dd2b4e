use std::sync::Arc;

use campus_backend::api::router;
use campus_backend::config::Config;
use campus_backend::db;
use campus_backend::identity::GoogleIdentityProvider;
use campus_backend::services::{ResetJob, ResetScheduler, ResetScope, Schedule, SystemClock};
use campus_backend::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "campus_backend=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url, 5).await?;

    let clock = Arc::new(SystemClock);
    let identity = Arc::new(GoogleIdentityProvider::new(config.google.clone())?);

    if config.reset_scope == ResetScope::ThroughToday {
        warn!("RESET_SCOPE=through-today: the nightly sweep will overwrite past absences");
    }
    let reset_at = config.reset_at;
    let bind_addr = config.bind_addr.clone();

    let state = AppState::new(pool, identity, clock.clone(), config);

    let reset_job: ResetJob = state.reset_job.clone();
    let scheduler = ResetScheduler::new(reset_job, clock, Schedule::DailyAt(reset_at));
    tokio::spawn(scheduler.start());

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
