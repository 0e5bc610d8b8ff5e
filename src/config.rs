// Configuration Module

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

// Configuration Struct
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub server_url: String,
}

// Default values for config if file doesn't exist
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

// Function to get the configuration file path
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "mediadash", "mediadash") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?; // Ensure config directory exists
        Ok(config_dir.join("mediadash.toml"))
    } else {
        bail!("Could not determine configuration directory")
    }
}

// Function to load configuration
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(config_path: &Path) -> Result<AppConfig> {
    if config_path.exists() {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse TOML from config file: {:?}", config_path))
    } else {
        Ok(AppConfig::default()) // Return default config if file doesn't exist
    }
}

// Function to save configuration
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(config, &get_config_path()?)
}

pub fn save_config_to(config: &AppConfig, config_path: &Path) -> Result<()> {
    let config_str =
        toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
    std::fs::write(config_path, config_str)
        .with_context(|| format!("Failed to write config file: {:?}", config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_config() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("mediadash.toml");

        let original_config = AppConfig {
            server_url: "http://media.example.com:5000".to_string(),
        };

        save_config_to(&original_config, &config_path)?;
        let loaded_config = load_config_from(&config_path)?;

        assert_eq!(original_config.server_url, loaded_config.server_url);

        dir.close()?;
        Ok(())
    }

    #[test]
    fn test_load_default_config() -> Result<()> {
        let dir = tempdir()?;
        // Don't create the file
        let config_path = dir.path().join("mediadash.toml");

        let loaded_config = load_config_from(&config_path)?;
        assert_eq!(loaded_config.server_url, DEFAULT_SERVER_URL);

        dir.close()?;
        Ok(())
    }

    #[test]
    fn test_malformed_config_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("mediadash.toml");
        std::fs::write(&config_path, "server_url = [not toml")?;

        assert!(load_config_from(&config_path).is_err());

        dir.close()?;
        Ok(())
    }
}
