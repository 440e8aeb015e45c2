//! Server configuration from environment.

use chrono::Duration;
use park_core::{RecommendationRules, DEFAULT_ACTIVE_WINDOW_MINUTES};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    /// How long an open check-in keeps counting toward occupancy
    pub active_checkin_window: Duration,
    pub seed_demo_data: bool,
    pub recommendation_rules: RecommendationRules,
}

impl Config {
    pub fn from_env() -> Self {
        let window_minutes = env::var("PARK_ACTIVE_WINDOW_MINUTES")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_ACTIVE_WINDOW_MINUTES);

        Self {
            server_port: env::var("PARK_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("PARK_DATABASE_PATH")
                .unwrap_or_else(|_| "data/park.db".to_string()),
            database_max_connections: env::var("PARK_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            active_checkin_window: Duration::minutes(window_minutes),
            seed_demo_data: env::var("PARK_SEED_DEMO_DATA")
                .map(|s| parse_flag(&s))
                .unwrap_or(true),
            recommendation_rules: RecommendationRules::default(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }
}
