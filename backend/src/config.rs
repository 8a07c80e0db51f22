use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::CultureOption;
use crate::utils::culture_cookie::{CookieName, DEFAULT_COOKIE_NAME};
use crate::utils::find_culture;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub localization: LocalizationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Culture used when neither the cookie nor Accept-Language selects one
    pub default_culture: String,
    /// Name of the culture persistence cookie
    pub cookie_name: String,
}

/// Message produced while loading, before the subscriber is installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNote {
    Info(String),
    Warn(String),
}

impl ConfigNote {
    /// Emit the note through `tracing`
    pub fn log(&self) {
        match self {
            Self::Info(message) => tracing::info!("{}", message),
            Self::Warn(message) => tracing::warn!("{}", message),
        }
    }
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from `path`, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    ///
    /// Returns the notes gathered on the way; log them once tracing is set up.
    pub fn load(path: Option<&str>) -> Result<(Self, Vec<ConfigNote>), anyhow::Error> {
        let mut notes = Vec::new();
        let mut config = match path.map(str::to_string).or_else(Self::find_config_file) {
            Some(config_path) => {
                let config = Self::from_toml(&config_path)?;
                notes.push(ConfigNote::Info(format!("Loaded configuration from {}", config_path)));
                config
            },
            None => {
                notes.push(ConfigNote::Warn(
                    "Configuration file not found, using defaults".to_string(),
                ));
                Config::default()
            },
        };

        notes.extend(config.apply_overrides(|key| std::env::var(key).ok()));
        config.validate()?;

        Ok((config, notes))
    }

    /// Apply overrides from a variable lookup
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,culture_selector=debug")
    /// - APP_LOG_FILE: Log file path, empty to disable file logging
    /// - APP_DEFAULT_CULTURE: Default culture code (e.g., "en-US")
    /// - APP_CULTURE_COOKIE_NAME: Culture cookie name
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Vec<ConfigNote> {
        let mut notes = Vec::new();
        let mut info = |message: String| notes.push(ConfigNote::Info(message));

        if let Some(host) = var("APP_SERVER_HOST") {
            self.server.host = host;
            info(format!("Override server.host from env: {}", self.server.host));
        }

        if let Some(level) = var("APP_LOG_LEVEL") {
            self.logging.level = level;
            info(format!("Override logging.level from env: {}", self.logging.level));
        }

        if let Some(file) = var("APP_LOG_FILE") {
            self.logging.file = if file.is_empty() { None } else { Some(file) };
            info(format!("Override logging.file from env: {:?}", self.logging.file));
        }

        if let Some(culture) = var("APP_DEFAULT_CULTURE") {
            self.localization.default_culture = culture;
            info(format!(
                "Override localization.default_culture from env: {}",
                self.localization.default_culture
            ));
        }

        if let Some(name) = var("APP_CULTURE_COOKIE_NAME") {
            self.localization.cookie_name = name;
            info(format!(
                "Override localization.cookie_name from env: {}",
                self.localization.cookie_name
            ));
        }

        if let Some(port) = var("APP_SERVER_PORT") {
            match port.parse() {
                Ok(port) => {
                    self.server.port = port;
                    notes.push(ConfigNote::Info(format!(
                        "Override server.port from env: {}",
                        self.server.port
                    )));
                },
                Err(e) => notes.push(ConfigNote::Warn(format!(
                    "Invalid APP_SERVER_PORT '{}': {} (keep {})",
                    port, e, self.server.port
                ))),
            }
        }

        notes
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        self.localization.default_culture()?;
        self.localization.cookie_name()?;

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        possible_paths
            .iter()
            .find(|path| Path::new(path).exists())
            .map(|path| path.to_string())
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl LocalizationConfig {
    pub fn default_culture(&self) -> Result<&'static CultureOption, anyhow::Error> {
        find_culture(&self.default_culture).ok_or_else(|| {
            anyhow::anyhow!(
                "localization.default_culture '{}' is not a supported culture",
                self.default_culture
            )
        })
    }

    pub fn cookie_name(&self) -> Result<CookieName, anyhow::Error> {
        Ok(CookieName::new(self.cookie_name.clone())?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,culture_selector=debug".to_string(),
            file: Some("logs/culture-selector.log".to_string()),
        }
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self { default_culture: "en-US".to_string(), cookie_name: DEFAULT_COOKIE_NAME.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.localization.default_culture().unwrap().code, "en-US");
        assert_eq!(config.localization.cookie_name().unwrap().as_str(), ".AspNetCore.Culture");
    }

    #[test]
    fn test_parse_toml_with_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [localization]
            default_culture = "ar-SA"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.localization.default_culture, "ar-SA");
        assert_eq!(config.localization.cookie_name, DEFAULT_COOKIE_NAME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let notes = config.apply_overrides(lookup(&[
            ("APP_SERVER_PORT", "3000"),
            ("APP_LOG_FILE", ""),
            ("APP_DEFAULT_CULTURE", "ar-SA"),
            ("APP_CULTURE_COOKIE_NAME", "culture"),
        ]));
        assert_eq!(notes.len(), 4);
        assert!(notes.iter().all(|n| matches!(n, ConfigNote::Info(_))));
        assert!(notes.contains(&ConfigNote::Info(
            "Override localization.default_culture from env: ar-SA".to_string()
        )));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.file, None);
        assert_eq!(config.localization.default_culture, "ar-SA");
        assert_eq!(config.localization.cookie_name, "culture");
    }

    #[test]
    fn test_no_overrides_no_notes() {
        let mut config = Config::default();
        assert!(config.apply_overrides(lookup(&[])).is_empty());
    }

    #[test]
    fn test_load_reports_source_file() {
        let path = std::env::temp_dir().join(format!("culture-selector-{}.toml", std::process::id()));
        std::fs::write(&path, "[localization]\ndefault_culture = \"ar-SA\"\n").unwrap();

        let (config, notes) = Config::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.localization.default_culture, "ar-SA");
        assert!(matches!(&notes[0], ConfigNote::Info(m) if m.starts_with("Loaded configuration from")));
    }

    #[test]
    fn test_invalid_port_override_is_ignored() {
        let mut config = Config::default();
        let notes = config.apply_overrides(lookup(&[("APP_SERVER_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 8080);
        assert_eq!(notes.len(), 1);
        match &notes[0] {
            ConfigNote::Warn(message) => assert!(message.contains("not-a-port")),
            other => panic!("expected a warning, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_localization() {
        let mut config = Config::default();
        config.localization.default_culture = "fr-FR".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.localization.cookie_name = "bad name".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
