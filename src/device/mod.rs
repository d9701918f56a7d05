// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod manager;

pub use manager::choose_device;

#[cfg(feature = "candle")]
pub use manager::select_device;
