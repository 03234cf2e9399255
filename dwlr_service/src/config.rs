/// Service configuration loaded from TOML.
///
/// Every section is optional; a missing file section falls back to the
/// defaults below. Example:
///
/// ```toml
/// stations_file = "stations.toml"
/// stale_after_minutes = 1440
///
/// [generator]
/// default_days = 30
/// fallback_base_level_m = 20.0
///
/// [logging]
/// level = "info"
/// file = "dwlr.log"
/// console_timestamps = false
/// ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::alert::stalenesses::DEFAULT_STALE_AFTER_MINUTES;
use crate::generate::{DEFAULT_DAYS, GeneratorSettings, MAX_DAYS};
use crate::logging::{self, LogLevel};
use crate::model::ConfigError;
use crate::stations::StationRegistry;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "DWLR_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Window length when the caller does not give one.
    pub default_days: u32,
    #[serde(flatten)]
    pub settings: GeneratorSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_DAYS,
            settings: GeneratorSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

impl LoggingConfig {
    pub fn min_level(&self) -> Result<LogLevel, ConfigError> {
        self.level.parse().map_err(ConfigError::InvalidSetting)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Stations TOML to load instead of the embedded fixtures. Relative
    /// paths resolve against the config file's directory.
    pub stations_file: Option<PathBuf>,
    pub stale_after_minutes: u64,
    pub generator: GeneratorConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stations_file: None,
            stale_after_minutes: DEFAULT_STALE_AFTER_MINUTES,
            generator: GeneratorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses and validates a config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file. A relative `stations_file` is rewritten to be
    /// relative to the config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml_str(&contents)?;

        config.stations_file = config.stations_file.map(|stations| match path.parent() {
            Some(dir) if stations.is_relative() => dir.join(stations),
            _ => stations,
        });
        Ok(config)
    }

    /// Loads the file named by `DWLR_CONFIG`, or defaults when unset.
    /// A set but unreadable/invalid file is an error, not a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.default_days > MAX_DAYS {
            return Err(ConfigError::InvalidSetting(format!(
                "default_days must be at most {}",
                MAX_DAYS
            )));
        }
        self.generator.settings.validate()?;
        self.logging.min_level()?;
        Ok(())
    }

    /// Builds the station registry this config points at.
    pub fn station_registry(&self) -> Result<StationRegistry, ConfigError> {
        match &self.stations_file {
            Some(path) => StationRegistry::load(path),
            None => StationRegistry::builtin(),
        }
    }

    /// Installs the global logger from the `[logging]` section.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        let level = self.logging.min_level()?;
        logging::init_logger(level, self.logging.file.as_deref(), self.logging.console_timestamps);
        Ok(())
    }
}
