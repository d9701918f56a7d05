// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod config;
pub mod device;
pub mod domain;
pub mod engine;
pub mod error;
pub mod model;
pub mod service;
pub mod text;
pub mod utils;

pub use config::{AppConfig, ConfigError, ConfigLoader, DeviceType, ModelConfig};
pub use domain::{
    GenerationOptions, PipelineOutput, SummarizationRequest, SummarizationResponse, SummaryRecord,
};
pub use engine::{CandleProvider, EngineProvider, SummarizationEngine};
pub use error::AppError;
pub use service::{SummarizationService, catch_all, respond};
