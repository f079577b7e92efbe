use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll timeout / redraw interval in milliseconds
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
}

fn default_refresh_rate() -> u64 {
    50
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourConfig {
    /// Settle delay between deciding to advance and locating the next target
    /// (lets navigation and redraws land first)
    #[serde(default = "default_advance_delay")]
    pub advance_delay_ms: u64,
    /// Prefix for all transition routes
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Path to a tour definition JSON file; the embedded onboarding tour is
    /// used when unset
    #[serde(default)]
    pub definition: Option<String>,
}

fn default_advance_delay() -> u64 {
    100
}

fn default_base_path() -> String {
    "/app/".to_string()
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay(),
            base_path: default_base_path(),
            definition: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to a file instead of stderr while the TUI owns the screen
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for runtime state (log files live under it)
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    ".tourguide".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so tourguide works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config in ~/.config/tourguide/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tourguide").join("config.json");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with TOURGUIDE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("TOURGUIDE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Get absolute path to the state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to the logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tour.advance_delay_ms, 100);
        assert_eq!(config.tour.base_path, "/app/");
        assert!(config.tour.definition.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.to_file);
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "tour": { "advance_delay_ms": 250, "base_path": "/spa/" } }"#,
        )
        .unwrap();

        let config = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.tour.advance_delay_ms, 250);
        assert_eq!(config.tour.base_path, "/spa/");
        // Untouched sections keep their defaults
        assert_eq!(config.ui.refresh_rate_ms, 50);
    }

    #[test]
    fn test_logs_path_under_state_dir() {
        let config = Config::default();
        let logs = config.logs_path();
        assert!(logs.ends_with(".tourguide/logs"));
    }
}
