// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::constants::DEFAULT_MAX_INPUT_TOKENS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Cpu,
    Cuda,
    Metal,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::Cpu => write!(f, "cpu"),
            DeviceType::Cuda => write!(f, "cuda"),
            DeviceType::Metal => write!(f, "metal"),
        }
    }
}

/// 模型加载相关配置。
///
/// 模型标识和解码参数是固定的，这里只控制权重从哪里来、放到哪个设备上。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// 为 false 时强制使用 CPU
    pub use_gpu: bool,
    /// Hugging Face 缓存目录，默认沿用 hf-hub 的位置
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// 已下载好的模型目录（包含 config.json / tokenizer.json / model.safetensors）
    #[serde(default)]
    pub local_path: Option<PathBuf>,
    /// 只读取缓存，不访问网络
    pub offline: bool,
    pub max_input_tokens: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            use_gpu: true,
            cache_dir: None,
            local_path: None,
            offline: false,
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
        }
    }
}
