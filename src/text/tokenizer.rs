// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::{build_prompt, truncate_ids};
use crate::error::AppError;
use std::path::Path;
use tokenizers::Tokenizer as HfTokenizer;

const EOS_TOKEN: &str = "</s>";

pub struct SummaryTokenizer {
    tokenizer: HfTokenizer,
    max_input_tokens: usize,
    eos_id: Option<u32>,
}

impl SummaryTokenizer {
    pub fn from_file(path: &Path, max_input_tokens: usize) -> Result<Self, AppError> {
        let tokenizer = HfTokenizer::from_file(path)
            .map_err(|e| AppError::TokenizationError(e.to_string()))?;
        let eos_id = tokenizer.token_to_id(EOS_TOKEN);

        Ok(Self {
            tokenizer,
            max_input_tokens,
            eos_id,
        })
    }

    /// 编码带任务前缀的输入，并截断到模型允许的最大长度
    pub fn encode_prompt(&self, text: &str) -> Result<Vec<u32>, AppError> {
        let encoding = self
            .tokenizer
            .encode(build_prompt(text), true)
            .map_err(|e| AppError::TokenizationError(e.to_string()))?;

        let ids = encoding.get_ids().to_vec();
        if ids.len() > self.max_input_tokens {
            tracing::debug!(
                "Truncating input from {} to {} tokens",
                ids.len(),
                self.max_input_tokens
            );
        }
        Ok(truncate_ids(ids, self.max_input_tokens, self.eos_id))
    }

    pub fn decode(&self, ids: &[u32]) -> Result<String, AppError> {
        self.tokenizer
            .decode(ids, true)
            .map(|text| text.trim().to_string())
            .map_err(|e| AppError::TokenizationError(e.to_string()))
    }
}
