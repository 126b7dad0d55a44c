//! Configuration management for the Companion CLI
//!
//! Stores the API base URL, session token and default category in
//! ~/.config/companion/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "companion";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Category id applied to `list` when no `--category` is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            default_category: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content).with_context(|| "Failed to parse config file")
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {:?}", dir))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set session token
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Session token, or an error telling the user to log in
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .context("Not logged in. Run 'companion login' first.")
    }

    /// Apply `COMPANION_BASE_URL` / `COMPANION_TOKEN` overrides
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("COMPANION_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup("COMPANION_TOKEN").filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("companion-cli-test-{}-{}", std::process::id(), name))
            .join(CONFIG_FILE)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(&temp_path("missing")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.require_token().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let mut config = Config::default();
        config.set_token("tok".to_string());
        config.default_category = Some("8c4f8a7e-2d3b-4c59-9a0c-5f1e2d3c4b5a".to_string());

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.require_token().unwrap(), "tok");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_uses_default_base_url() {
        let config: Config = toml::from_str("token = \"abc\"").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_env_overrides_skip_empty_values() {
        let config = Config::default().with_env_overrides(|key| match key {
            "COMPANION_BASE_URL" => Some("https://companion.example".to_string()),
            "COMPANION_TOKEN" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.base_url, "https://companion.example");
        assert!(config.token.is_none());
    }
}
