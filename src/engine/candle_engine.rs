// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::SummarizationEngine;
use crate::config::model::{DeviceType, ModelConfig};
use crate::device::select_device;
use crate::domain::{GenerationOptions, PipelineOutput};
use crate::error::AppError;
use crate::model::ModelFiles;
use crate::text::SummaryTokenizer;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5::{Config as T5Config, T5ForConditionalGeneration};

// 贪心解码不使用随机数，种子只为满足接口
const GREEDY_SEED: u64 = 299792458;

pub struct CandleEngine {
    model: T5ForConditionalGeneration,
    tokenizer: SummaryTokenizer,
    config: T5Config,
    device: Device,
    device_type: DeviceType,
}

impl CandleEngine {
    pub fn new(config: &ModelConfig) -> Result<Self, AppError> {
        let (device, device_type) = select_device(config.use_gpu);
        let files = ModelFiles::resolve(config)?;
        Self::from_files(&files, config.max_input_tokens, device, device_type)
    }

    pub fn from_files(
        files: &ModelFiles,
        max_input_tokens: usize,
        device: Device,
        device_type: DeviceType,
    ) -> Result<Self, AppError> {
        let config_content = std::fs::read_to_string(&files.config)?;
        let mut config: T5Config = serde_json::from_str(&config_content)
            .map_err(|e| AppError::ModelLoadError(e.to_string()))?;
        config.use_cache = true;

        let tokenizer = SummaryTokenizer::from_file(&files.tokenizer, max_input_tokens)?;

        tracing::info!(
            "Loading safetensors model weights from: {:?}",
            files.weights
        );
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device)
        }
        .map_err(|e| AppError::ModelLoadError(e.to_string()))?;
        let model = T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| AppError::ModelLoadError(e.to_string()))?;

        tracing::info!("Model loaded on {}", device_type);

        Ok(Self {
            model,
            tokenizer,
            config,
            device,
            device_type,
        })
    }

    fn generate(
        &mut self,
        input_ids: &[u32],
        options: &GenerationOptions,
    ) -> candle_core::Result<Vec<u32>> {
        self.model.clear_kv_cache();

        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = self.model.encode(&input)?;

        let start = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;
        let eos = self.config.eos_token_id as u32;
        let use_cache = self.config.use_cache;
        let model = &mut self.model;
        let device = &self.device;

        greedy_decode(start, eos, options, |tokens| {
            let decoder_input = if tokens.len() == 1 || !use_cache {
                Tensor::new(tokens, device)?.unsqueeze(0)?
            } else {
                let last = tokens[tokens.len() - 1];
                Tensor::new(&[last], device)?.unsqueeze(0)?
            };
            model.decode(&decoder_input, &encoder_output)?.squeeze(0)
        })
    }
}

/// Greedy decoding loop. `next_logits` receives every token so far (start
/// token first) and returns the logits for the next position.
///
/// The start token counts toward `max_length`, and EOS is masked out while
/// fewer than `min_length` tokens exist. The start token is not returned.
fn greedy_decode<F>(
    start: u32,
    eos: u32,
    options: &GenerationOptions,
    mut next_logits: F,
) -> candle_core::Result<Vec<u32>>
where
    F: FnMut(&[u32]) -> candle_core::Result<Tensor>,
{
    let min_length = options.effective_min_length();
    let mut processor = LogitsProcessor::new(GREEDY_SEED, None, None);
    let mut tokens = vec![start];

    while tokens.len() < options.max_length {
        let logits = next_logits(&tokens)?;
        let logits = if tokens.len() < min_length {
            suppress_token(&logits, eos)?
        } else {
            logits
        };

        let next = processor.sample(&logits)?;
        if next == eos {
            break;
        }
        tokens.push(next);
    }

    Ok(tokens.split_off(1))
}

fn suppress_token(logits: &Tensor, token: u32) -> candle_core::Result<Tensor> {
    let mut values = logits.to_dtype(DType::F32)?.to_vec1::<f32>()?;
    if let Some(value) = values.get_mut(token as usize) {
        *value = f32::NEG_INFINITY;
    }
    Tensor::new(values.as_slice(), logits.device())
}

impl SummarizationEngine for CandleEngine {
    fn summarize(
        &mut self,
        text: &str,
        options: &GenerationOptions,
    ) -> Result<PipelineOutput, AppError> {
        let input_ids = self.tokenizer.encode_prompt(text)?;
        tracing::debug!(
            "Summarizing {} input tokens (max_length={}, min_length={})",
            input_ids.len(),
            options.max_length,
            options.effective_min_length()
        );

        let output_ids = self
            .generate(&input_ids, options)
            .map_err(|e| AppError::InferenceError(e.to_string()))?;
        let summary = self.tokenizer.decode(&output_ids)?;

        Ok(PipelineOutput::single(summary))
    }

    fn device_type(&self) -> DeviceType {
        self.device_type
    }
}
