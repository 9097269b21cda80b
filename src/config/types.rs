use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use gallery_db::gateway::GatewayOptions;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite database file. `~` is expanded.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// How long a connection waits on a locked database, in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Use a connection pool of this size instead of a connection per call.
    /// Only needed when several callers share one gateway concurrently.
    #[serde(default)]
    pub pool_size: Option<u32>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("gallery.db")
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_size: None,
        }
    }
}

impl DatabaseConfig {
    pub fn gateway_options(&self) -> GatewayOptions {
        GatewayOptions {
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            pool_size: self.pool_size,
        }
    }
}
