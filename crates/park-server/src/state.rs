//! Shared application state.

use chrono::Duration;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::persistence::Database;

/// Application state shared by every request handler.
pub struct AppState {
    db: Database,
    config: Config,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// How long an open check-in counts toward occupancy.
    pub fn active_window(&self) -> Duration {
        self.config.active_checkin_window
    }
}
