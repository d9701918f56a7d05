// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod constants;

pub use constants::{
    DEFAULT_MAX_INPUT_TOKENS, DEFAULT_MAX_LENGTH, MIN_LENGTH, MODEL_ID, MODEL_REVISION,
    TASK_PREFIX,
};
