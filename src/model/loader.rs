// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::error::AppError;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// 加载模型所需的三个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    pub fn from_local_dir(dir: &Path) -> Result<Self, AppError> {
        if !dir.is_dir() {
            return Err(AppError::ModelLoadError(format!(
                "Model directory does not exist: {}",
                dir.display()
            )));
        }

        let files = Self {
            config: dir.join(CONFIG_FILE),
            tokenizer: dir.join(TOKENIZER_FILE),
            weights: dir.join(WEIGHTS_FILE),
        };

        for path in [&files.config, &files.tokenizer, &files.weights] {
            if !path.is_file() {
                return Err(AppError::ModelLoadError(format!(
                    "Missing model file: {}",
                    path.display()
                )));
            }
        }

        Ok(files)
    }

    /// Resolves the model files: a configured local directory wins, then the
    /// hub cache when offline, otherwise the hub (downloading on first use).
    #[cfg(feature = "candle")]
    pub fn resolve(config: &crate::config::ModelConfig) -> Result<Self, AppError> {
        use crate::utils::constants::{MODEL_ID, MODEL_REVISION};
        use hf_hub::{Cache, Repo, RepoType, api::sync::ApiBuilder};

        if let Some(dir) = &config.local_path {
            tracing::info!("Loading model from local path: {:?}", dir);
            return Self::from_local_dir(dir);
        }

        let repo = Repo::with_revision(
            MODEL_ID.to_string(),
            RepoType::Model,
            MODEL_REVISION.to_string(),
        );

        if config.offline {
            tracing::info!("Loading model {} from the local hub cache", MODEL_ID);
            let cache = match &config.cache_dir {
                Some(dir) => Cache::new(dir.clone()),
                None => Cache::default(),
            };
            let cached = cache.repo(repo);
            let get = |name: &str| {
                cached.get(name).ok_or_else(|| {
                    AppError::ModelLoadError(format!(
                        "{} for {} is not in the hub cache (offline mode)",
                        name, MODEL_ID
                    ))
                })
            };
            return Ok(Self {
                config: get(CONFIG_FILE)?,
                tokenizer: get(TOKENIZER_FILE)?,
                weights: get(WEIGHTS_FILE)?,
            });
        }

        tracing::info!("Downloading/Loading model from HuggingFace Hub: {}", MODEL_ID);
        let mut builder = ApiBuilder::new().with_progress(false);
        if let Some(dir) = &config.cache_dir {
            builder = builder.with_cache_dir(dir.clone());
        }
        let api = builder
            .build()
            .map_err(|e| AppError::ModelLoadError(e.to_string()))?;
        let api_repo = api.repo(repo);

        let get = |name: &str| {
            api_repo
                .get(name)
                .map_err(|e| AppError::ModelLoadError(format!("{}: {}", name, e)))
        };

        Ok(Self {
            config: get(CONFIG_FILE)?,
            tokenizer: get(TOKENIZER_FILE)?,
            weights: get(WEIGHTS_FILE)?,
        })
    }
}
