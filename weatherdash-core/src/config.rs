use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{WeatherError, model::LocationQuery, units::TemperatureUnit};

/// Environment variable that overrides the key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Value shipped in sample configs; treated the same as a missing key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_OPENWEATHERMAP_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "London"
/// units = "celsius"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// City shown on start-up and after "try again" with no prior search.
    pub default_city: Option<String>,

    #[serde(default)]
    pub units: TemperatureUnit,

    /// Override for the provider endpoint, mostly for testing.
    pub base_url: Option<String>,
}

impl Config {
    /// The usable API key, or a configuration error if it is missing or still
    /// the placeholder.
    pub fn api_key(&self) -> Result<&str, WeatherError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(key),
            _ => Err(WeatherError::Configuration(
                "Please add your OpenWeatherMap API key to use the weather app.\n\
                 Hint: run `weatherdash configure` or set OPENWEATHER_API_KEY."
                    .to_string(),
            )),
        }
    }

    pub fn default_query(&self) -> LocationQuery {
        self.default_city
            .as_deref()
            .and_then(LocationQuery::from_search)
            .unwrap_or_default()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    /// The environment key, when set, wins over the file.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherdash", "weatherdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn api_key_rejects_placeholder_and_blank() {
        for key in [PLACEHOLDER_API_KEY, "", "   "] {
            let cfg = Config {
                api_key: Some(key.to_string()),
                ..Config::default()
            };
            assert!(cfg.api_key().is_err(), "{key:?} should be rejected");
        }
    }

    #[test]
    fn api_key_is_trimmed() {
        let cfg = Config {
            api_key: Some("  abc123 ".to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.api_key(), Ok("abc123"));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = Config {
            api_key: Some("FILE_KEY".to_string()),
            ..Config::default()
        };

        cfg.apply_env_key(Some(String::new()));
        assert_eq!(cfg.api_key(), Ok("FILE_KEY"));

        cfg.apply_env_key(Some("ENV_KEY".to_string()));
        assert_eq!(cfg.api_key(), Ok("ENV_KEY"));
    }

    #[test]
    fn default_query_falls_back_to_london() {
        assert_eq!(Config::default().default_query(), LocationQuery::city("London"));

        let cfg = Config {
            default_city: Some(" Berlin ".to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.default_query(), LocationQuery::city("Berlin"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".to_string()),
            default_city: Some("Lisbon".to_string()),
            units: TemperatureUnit::Fahrenheit,
            base_url: None,
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn units_default_when_absent_from_file() {
        let cfg: Config = toml::from_str("api_key = \"K\"").unwrap();
        assert_eq!(cfg.units, TemperatureUnit::Celsius);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "units = 42").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
