#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub api_addr: String,
    pub functions_base_url: String,
    pub service_key: String,
    pub migrate_on_startup: bool,
    pub stale_search_cancel_days: i64,
    pub maintenance_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env_or_fallback("CHAMBY_DATABASE_URL", "DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("CHAMBY_DATABASE_URL or DATABASE_URL is missing"))?;

        let api_addr = env_or_fallback("CHAMBY_API_ADDR", "API_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        // Base URL of the managed backend that hosts the payment functions,
        // e.g. https://<project>.supabase.co
        let functions_base_url = env_or_fallback("CHAMBY_FUNCTIONS_BASE_URL", "SUPABASE_URL")
            .ok_or_else(|| {
                anyhow::anyhow!("CHAMBY_FUNCTIONS_BASE_URL or SUPABASE_URL is missing")
            })?;

        let service_key = env_or_fallback("CHAMBY_SERVICE_KEY", "SUPABASE_SERVICE_KEY")
            .ok_or_else(|| anyhow::anyhow!("CHAMBY_SERVICE_KEY or SUPABASE_SERVICE_KEY is missing"))?;

        let migrate_on_startup = env_bool("CHAMBY_MIGRATE_ON_STARTUP").unwrap_or(false);

        let stale_search_cancel_days = env_or_fallback("CHAMBY_STALE_SEARCH_CANCEL_DAYS", "STALE_SEARCH_CANCEL_DAYS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(7);

        let maintenance_interval_secs =
            env_or_fallback("CHAMBY_MAINTENANCE_INTERVAL_SECS", "MAINTENANCE_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(300);

        Ok(Self {
            database_url,
            api_addr,
            functions_base_url,
            service_key,
            migrate_on_startup,
            stale_search_cancel_days,
            maintenance_interval_secs,
        })
    }
}

fn env_or_fallback(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| std::env::var(fallback).ok().filter(|s| !s.trim().is_empty()))
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
