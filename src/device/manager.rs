// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::model::DeviceType;
use std::panic::{self, UnwindSafe};
use tracing::{info, warn};

/// 设备选择策略。
///
/// `detect` 返回可用的加速器类型；检测本身失败时按“无加速器”处理，
/// 不向上传播错误。
pub fn choose_device<F>(use_gpu: bool, detect: F) -> DeviceType
where
    F: FnOnce() -> Result<Option<DeviceType>, String>,
{
    if !use_gpu {
        info!("GPU disabled by configuration, using CPU");
        return DeviceType::Cpu;
    }

    match detect() {
        Ok(Some(device_type)) => device_type,
        Ok(None) => DeviceType::Cpu,
        Err(e) => {
            warn!("Accelerator detection failed, falling back to CPU: {}", e);
            DeviceType::Cpu
        }
    }
}

/// Runs an availability query, turning a panic inside the driver bindings
/// into an error.
#[cfg_attr(not(feature = "candle"), allow(dead_code))]
fn guarded_query<F>(query: F) -> Result<Option<DeviceType>, String>
where
    F: FnOnce() -> Option<DeviceType> + UnwindSafe,
{
    panic::catch_unwind(query).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        format!("accelerator availability query panicked: {}", message)
    })
}

#[cfg(feature = "candle")]
fn detect_accelerator() -> Result<Option<DeviceType>, String> {
    guarded_query(|| {
        if candle_core::utils::cuda_is_available() {
            Some(DeviceType::Cuda)
        } else if candle_core::utils::metal_is_available() {
            Some(DeviceType::Metal)
        } else {
            None
        }
    })
}

/// Picks the candle device once per invocation. Creating the accelerator device
/// can still fail after a successful detection; that case also ends up on CPU.
#[cfg(feature = "candle")]
pub fn select_device(use_gpu: bool) -> (candle_core::Device, DeviceType) {
    use candle_core::Device;

    let device_type = choose_device(use_gpu, detect_accelerator);
    let created = match device_type {
        DeviceType::Cuda => Device::new_cuda(0),
        DeviceType::Metal => Device::new_metal(0),
        DeviceType::Cpu => Ok(Device::Cpu),
    };

    match created {
        Ok(device) => {
            info!("Using {} device", device_type);
            (device, device_type)
        }
        Err(e) => {
            warn!("Failed to create {} device, using CPU: {}", device_type, e);
            (Device::Cpu, DeviceType::Cpu)
        }
    }
}
