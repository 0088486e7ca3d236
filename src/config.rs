//! Application configuration loaded from environment variables.

use chrono::NaiveDate;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Offset from UTC (minutes) used to decide what "today" is
    pub utc_offset_minutes: i32,
    /// Upper bound on attractions accepted in one request
    pub max_selected_attractions: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            utc_offset_minutes: 420,
            max_selected_attractions: 50,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; malformed numbers are an error rather
    /// than silently replaced by defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Ok(Self {
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            port: parse_var("PORT", defaults.port)?,
            utc_offset_minutes: parse_var("UTC_OFFSET_MINUTES", defaults.utc_offset_minutes)?,
            max_selected_attractions: parse_var(
                "MAX_SELECTED_ATTRACTIONS",
                defaults.max_selected_attractions,
            )?,
        })
    }

    /// Config used by tests.
    pub fn test_default() -> Self {
        Self::default()
    }

    /// Current calendar date at the configured offset.
    pub fn today(&self) -> NaiveDate {
        crate::time_utils::today_at_offset(self.utc_offset_minutes)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
