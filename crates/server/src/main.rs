use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use chamby::api::{self, ApiState};
use chamby::config::Config;
use chamby::db;
use chamby::jobs::JobsRepo;
use chamby::payments::FunctionsClient;
use chamby::pricing::CreditsRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = Config::from_env()?;

    info!(
        api_addr = %cfg.api_addr,
        functions_base_url = %cfg.functions_base_url,
        migrate_on_startup = cfg.migrate_on_startup,
        stale_search_cancel_days = cfg.stale_search_cancel_days,
        "chamby server starting"
    );

    let pool = db::make_pool(&cfg.database_url).await?;
    if cfg.migrate_on_startup {
        db::run_migrations(&pool).await?;
        info!("migrations applied");
    }

    let jobs = JobsRepo::new(pool.clone());
    let credits = CreditsRepo::new(pool.clone());
    let payments = FunctionsClient::new(&cfg.functions_base_url, &cfg.service_key);

    // Bookings that never found a provider get cancelled after a grace
    // period. Credit expiry needs no sweep: active-credit queries filter on
    // expires_at.
    {
        let jobs = jobs.clone();
        let days = cfg.stale_search_cancel_days;
        let interval = Duration::from_secs(cfg.maintenance_interval_secs);
        tokio::spawn(async move {
            loop {
                match jobs.cancel_stale_searching(days).await {
                    Ok(0) => {}
                    Ok(n) => warn!(cancelled = n, "cancelled stale searching jobs"),
                    Err(e) => error!(error = %e, "stale-search sweep failed"),
                }
                tokio::time::sleep(interval).await;
            }
        });
    }

    let app = api::router(ApiState {
        jobs,
        credits,
        payments,
    });

    let listener = tokio::net::TcpListener::bind(&cfg.api_addr).await?;
    info!(addr = %cfg.api_addr, "api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
