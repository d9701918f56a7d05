// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(feature = "candle")]
pub mod candle_engine;

use crate::config::ConfigError;
use crate::config::model::{DeviceType, ModelConfig};
use crate::domain::{GenerationOptions, PipelineOutput};
use crate::error::AppError;

/// 摘要推理引擎抽象接口
pub trait SummarizationEngine {
    /// 对单条文本生成摘要
    fn summarize(
        &mut self,
        text: &str,
        options: &GenerationOptions,
    ) -> Result<PipelineOutput, AppError>;

    fn device_type(&self) -> DeviceType {
        DeviceType::Cpu
    }
}

/// Capability provider for the summarization backend.
///
/// `acquire` returns [`AppError::BackendUnavailable`] when the backend cannot
/// exist in this build; any other error means it exists but failed to load.
pub trait EngineProvider {
    fn acquire(&self) -> Result<Box<dyn SummarizationEngine>, AppError>;
}

/// 默认的 candle T5 后端
///
/// A configuration error is held until `acquire`, so requests that never
/// need the engine are not affected by it.
#[derive(Debug, Clone)]
pub struct CandleProvider {
    #[cfg_attr(not(feature = "candle"), allow(dead_code))]
    config: Result<ModelConfig, ConfigError>,
}

impl Default for CandleProvider {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl CandleProvider {
    pub fn new(config: ModelConfig) -> Self {
        Self { config: Ok(config) }
    }

    pub fn from_loaded(config: Result<ModelConfig, ConfigError>) -> Self {
        Self { config }
    }

    pub fn is_compiled() -> bool {
        cfg!(feature = "candle")
    }
}

impl EngineProvider for CandleProvider {
    #[cfg(feature = "candle")]
    fn acquire(&self) -> Result<Box<dyn SummarizationEngine>, AppError> {
        let config = self.config.clone()?;
        let engine = candle_engine::CandleEngine::new(&config)?;
        Ok(Box::new(engine))
    }

    #[cfg(not(feature = "candle"))]
    fn acquire(&self) -> Result<Box<dyn SummarizationEngine>, AppError> {
        Err(AppError::BackendUnavailable(
            "local-summarizer was built without the `candle` feature".to_string(),
        ))
    }
}
