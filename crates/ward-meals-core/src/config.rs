//! Environment configuration and logging setup.

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::{Database, DbResult};

pub const DB_PATH_VAR: &str = "WARD_MEALS_DB_PATH";
pub const LOG_VAR: &str = "WARD_MEALS_LOG";

const DEFAULT_DB_PATH: &str = "ward_meals.db";
const DEFAULT_LOG: &str = "info";

/// Core configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreConfig {
    /// SQLite file (default: `ward_meals.db`).
    pub db_path: PathBuf,
    /// `EnvFilter` directive (default: `info`).
    pub log_filter: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_filter: DEFAULT_LOG.into(),
        }
    }
}

impl CoreConfig {
    /// Load `.env` if present, then read the environment.
    ///
    /// | Env Var              | Default         |
    /// |----------------------|-----------------|
    /// | `WARD_MEALS_DB_PATH` | `ward_meals.db` |
    /// | `WARD_MEALS_LOG`     | `info`          |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            db_path: read(DB_PATH_VAR).map(PathBuf::from).unwrap_or(defaults.db_path),
            log_filter: read(LOG_VAR).unwrap_or(defaults.log_filter),
        }
    }

    pub fn open_database(&self) -> DbResult<Database> {
        tracing::info!(path = %self.db_path.display(), "Opening database");
        Database::open(&self.db_path)
    }
}

/// Install a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`.
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
