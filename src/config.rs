use crate::domain::DEFAULT_SESSION_NAME;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings stored in config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label recorded for sessions left unnamed
    pub default_session_name: String,
    pub start_muted: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_session_name: DEFAULT_SESSION_NAME.to_string(),
            start_muted: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.default_session_name.trim().is_empty() {
            return Err(anyhow::anyhow!("Default session name must not be empty"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(anyhow::anyhow!(
                "Log level must be one of: {}",
                valid_levels.join(", ")
            ));
        }

        Ok(())
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Load config.toml, defaults if the file doesn't exist
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let contents = match crate::persistence::read_file(path)? {
        Some(contents) => contents,
        None => return Ok(Config::default()),
    };

    let config: Config = toml::from_str(&contents).map_err(|e| {
        anyhow::anyhow!(
            "Failed to parse config file {}: {}. Please check the file format.",
            path.display(),
            e
        )
    })?;

    config.validate()?;
    Ok(config)
}

/// Save config.toml
pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    config.validate()?;
    let contents = toml::to_string_pretty(config)?;
    crate::persistence::atomic_write(path, &contents)
}

/// Write a config.toml with default values unless one exists.
/// Returns true if a file was written.
pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<bool> {
    if path.as_ref().exists() {
        return Ok(false);
    }

    save_config(path, &Config::default())?;
    Ok(true)
}
