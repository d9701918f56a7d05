// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(feature = "candle")]
pub mod tokenizer;

#[cfg(feature = "candle")]
pub use tokenizer::SummaryTokenizer;

use crate::utils::constants::TASK_PREFIX;

/// T5 系列模型需要任务前缀
pub fn build_prompt(text: &str) -> String {
    format!("{}{}", TASK_PREFIX, text.trim())
}

/// Cuts `ids` down to `max_tokens`. When the sequence ended with `eos_id`,
/// the truncated sequence still ends with it.
pub fn truncate_ids(mut ids: Vec<u32>, max_tokens: usize, eos_id: Option<u32>) -> Vec<u32> {
    if ids.len() <= max_tokens {
        return ids;
    }

    match eos_id {
        Some(eos) if max_tokens > 0 && ids.last() == Some(&eos) => {
            ids.truncate(max_tokens - 1);
            ids.push(eos);
        }
        _ => ids.truncate(max_tokens),
    }
    ids
}
