//! Configuration management for `Packwise`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PackwiseError;
use crate::models::PackingStyle;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `Packwise`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackwiseConfig {
    /// Wardrobe backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Local storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default planner settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Wardrobe backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the wardrobe backend
    #[serde(default = "default_backend_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_seconds: u32,
    /// Retries for wardrobe and trip calls (the enhancement call is never retried)
    #[serde(default = "default_backend_max_retries")]
    pub max_retries: u32,
    /// Ask the backend to enhance locally generated packing lists
    #[serde(default = "default_enhancement_enabled")]
    pub enhancement_enabled: bool,
    /// User whose trips are listed and saved
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

/// Where saved trips live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStoreKind {
    Local,
    Backend,
}

/// Local storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory location
    #[serde(default = "default_storage_location")]
    pub location: String,
    /// How long a wardrobe snapshot may stand in for the backend, in hours
    #[serde(default = "default_wardrobe_ttl")]
    pub wardrobe_ttl_hours: u32,
    /// Trip persistence backend
    #[serde(default = "default_trip_store")]
    pub trip_store: TripStoreKind,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default planner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Packing style used when the command line names none
    #[serde(default = "default_packing_style")]
    pub packing_style: String,
    /// Port for `packwise serve`
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_backend_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_backend_timeout() -> u32 {
    30
}

fn default_backend_max_retries() -> u32 {
    2
}

fn default_enhancement_enabled() -> bool {
    true
}

fn default_user_id() -> i64 {
    1
}

fn default_storage_location() -> String {
    "~/.local/share/packwise".to_string()
}

fn default_wardrobe_ttl() -> u32 {
    72
}

fn default_trip_store() -> TripStoreKind {
    TripStoreKind::Local
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_packing_style() -> String {
    "minimal".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_base_url(),
            timeout_seconds: default_backend_timeout(),
            max_retries: default_backend_max_retries(),
            enhancement_enabled: default_enhancement_enabled(),
            user_id: default_user_id(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            location: default_storage_location(),
            wardrobe_ttl_hours: default_wardrobe_ttl(),
            trip_store: default_trip_store(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            packing_style: default_packing_style(),
            port: default_port(),
        }
    }
}

impl PackwiseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. PACKWISE__BACKEND__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("PACKWISE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PackwiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("packwise").join("config.toml"))
    }

    /// Storage location with a leading `~` expanded
    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        match self.storage.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.storage.location)),
            None => PathBuf::from(&self.storage.location),
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.backend.base_url.is_empty() {
            self.backend.base_url = default_backend_base_url();
        }
        if self.backend.timeout_seconds == 0 {
            self.backend.timeout_seconds = default_backend_timeout();
        }
        if self.storage.location.is_empty() {
            self.storage.location = default_storage_location();
        }
        if self.storage.wardrobe_ttl_hours == 0 {
            self.storage.wardrobe_ttl_hours = default_wardrobe_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.packing_style.is_empty() {
            self.defaults.packing_style = default_packing_style();
        }
        if self.defaults.port == 0 {
            self.defaults.port = default_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.backend.timeout_seconds > 300 {
            return Err(PackwiseError::config("Backend timeout cannot exceed 300 seconds").into());
        }

        if self.backend.max_retries > 10 {
            return Err(PackwiseError::config("Backend max retries cannot exceed 10").into());
        }

        if self.storage.wardrobe_ttl_hours > 24 * 30 {
            return Err(PackwiseError::config(
                "Wardrobe snapshot TTL cannot exceed 720 hours (30 days)",
            )
            .into());
        }

        if self.backend.user_id <= 0 {
            return Err(PackwiseError::config("User id must be positive").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PackwiseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PackwiseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(
                PackwiseError::config("Backend base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        let styles: Vec<&str> = PackingStyle::ALL.iter().map(PackingStyle::as_str).collect();
        if !styles.contains(&self.defaults.packing_style.as_str()) {
            return Err(PackwiseError::config(format!(
                "Invalid default packing style '{}'. Must be one of: {}",
                self.defaults.packing_style,
                styles.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Create the data directory if it doesn't exist
    pub fn ensure_storage_dir(&self) -> Result<PathBuf> {
        let dir = self.storage_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(dir)
    }
}
