use serde::Deserialize;

use jaothui_core::config::Config;

use crate::domain::types::LookupStrategy;

/// Farms service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct FarmsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3120). Env var: `FARMS_PORT`.
    #[serde(default = "default_port")]
    pub farms_port: u16,
    /// `union` (default) or `sequential`. Env var: `FARM_CONTEXT_STRATEGY`.
    #[serde(default)]
    pub farm_context_strategy: LookupStrategy,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_port() -> u16 {
    3120
}

impl Config for FarmsConfig {}
