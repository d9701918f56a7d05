// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::model::ModelConfig;
use crate::utils::constants::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_INPUT_TOKENS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CONFIG_NAME: &str = "local-summarizer";
const DEFAULT_ENV_PREFIX: &str = "LOCAL_SUMMARIZER";

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// 分层配置加载：内置默认值 → 配置文件 → 环境变量
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = config::Config::builder();

        config = config.set_default("model.use_gpu", true)?;
        config = config.set_default("model.offline", false)?;
        config = config.set_default("model.max_input_tokens", DEFAULT_MAX_INPUT_TOKENS as u64)?;
        config = config.set_default("log_level", DEFAULT_LOG_LEVEL)?;

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            config = config.add_source(config::File::from(path.as_path()));
        } else {
            let default_config = PathBuf::from(format!("{}.toml", DEFAULT_CONFIG_NAME));
            if default_config.exists() {
                config = config.add_source(config::File::with_name(DEFAULT_CONFIG_NAME));
            }
        }

        config = config.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .ignore_empty(true),
        );

        let app_config: AppConfig = config.build()?.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.max_input_tokens == 0 {
            return Err(ConfigError::Message(
                "model.max_input_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Message(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Message(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "warn");
        assert!(config.model.use_gpu);
        assert_eq!(config.model.max_input_tokens, 512);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
log_level = "debug"

[model]
use_gpu = false
offline = true
cache_dir = "/tmp/hf-cache"
"#,
        );

        let config = ConfigLoader::new()
            .with_env_prefix("LOCAL_SUMMARIZER_TEST_FILE")
            .with_config_path(file.path())
            .load()
            .unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(!config.model.use_gpu);
        assert!(config.model.offline);
        assert_eq!(config.model.cache_dir, Some(PathBuf::from("/tmp/hf-cache")));
        assert_eq!(config.model.local_path, None);
        assert_eq!(config.model.max_input_tokens, 512);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ConfigLoader::new()
            .with_config_path("/nonexistent/local-summarizer.toml")
            .load();
        assert!(matches!(result, Err(ConfigError::Message(_))));
    }

    #[test]
    fn test_zero_max_input_tokens_rejected() {
        let file = write_config(
            r#"
[model]
max_input_tokens = 0
"#,
        );

        let result = ConfigLoader::new()
            .with_env_prefix("LOCAL_SUMMARIZER_TEST_ZERO")
            .with_config_path(file.path())
            .load();
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigLoader::new()
            .with_env_prefix("LOCAL_SUMMARIZER_TEST_EMPTY")
            .load()
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
