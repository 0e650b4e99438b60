//! Configuration management for prep-tui.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gen: GenConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&PathBuf>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.prep-tui.toml in the working directory)
        if let Some(root) = project_root {
            let project_config = root.join(".prep-tui.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/prep-tui/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("com", "prep-tui", "prep-tui") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (PREP_TUI__*)
        builder = builder.add_source(
            Environment::with_prefix("PREP_TUI")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration with default settings only
    pub fn load_defaults() -> Self {
        Self::default()
    }

    /// Resolve the API key: explicit config first, then GEMINI_API_KEY.
    pub fn api_key(&self) -> Option<String> {
        self.gen
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| {
                std::env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|k| !k.is_empty())
            })
    }

    /// Resolve the state store directory, falling back to the platform data dir.
    pub fn storage_dir(&self) -> PathBuf {
        if !self.storage.directory.as_os_str().is_empty() {
            return self.storage.directory.clone();
        }
        directories::ProjectDirs::from("com", "prep-tui", "prep-tui")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".prep-tui"))
    }
}

/// Generation endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Base URL of the completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for plain-text generation
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Model used for structured exam/deck generation
    #[serde(default = "default_exam_model")]
    pub exam_model: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// API key (prefer GEMINI_API_KEY over writing this to disk)
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            text_model: default_text_model(),
            exam_model: default_exam_model(),
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_exam_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style navigation (j/k/h/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: default_vim_navigation(),
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_vim_navigation() -> bool {
    true
}

/// State store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted panel state (empty = platform data dir)
    #[serde(default)]
    pub directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.gen.timeout_seconds, 60);
        assert_eq!(config.gen.text_model, "gemini-3-flash-preview");
        assert_eq!(config.gen.exam_model, "gemini-3-pro-preview");
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert!(config.ui.vim_navigation);
        assert!(config.storage.directory.as_os_str().is_empty());
    }

    #[test]
    fn test_storage_dir_override() {
        let config = AppConfig {
            storage: StorageConfig {
                directory: PathBuf::from("/tmp/prep-state"),
            },
            ..Default::default()
        };
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/prep-state"));
    }
}
