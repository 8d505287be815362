use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// TTL for the cached aggregate-stats response, in seconds.
    pub stats_cache_ttl_secs: u64,
    /// Seed the store with demo leads on startup.
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            stats_cache_ttl_secs: std::env::var("STATS_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("STATS_CACHE_TTL_SECS must be a valid number"))
                .and_then(|ttl: u64| {
                    if ttl == 0 {
                        anyhow::bail!("STATS_CACHE_TTL_SECS must be greater than zero");
                    }
                    Ok(ttl)
                })?,
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        };

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Stats cache TTL: {}s", config.stats_cache_ttl_secs);
        if config.seed_demo_data {
            tracing::info!("Demo seed data enabled");
        }

        Ok(config)
    }
}
