// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub const MODEL_ID: &str = "google-t5/t5-small";
pub const MODEL_REVISION: &str = "main";
pub const TASK_PREFIX: &str = "summarize: ";

pub const DEFAULT_MAX_LENGTH: usize = 150;
pub const MIN_LENGTH: usize = 20;
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 512;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub const UNAVAILABLE_PREFIX: &str = "transformers not available: ";
pub const EXCEPTION_KIND: &str = "exception";
