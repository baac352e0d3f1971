// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GPU telemetry acquisition with synthetic fallback.

use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::random::RandomSource;

use super::probe::{ControllerDescriptor, GpuProbe};
use super::sample::{synthetic, TelemetrySample};

/// Produces one [`TelemetrySample`] per call. Never fails: when the probe
/// errors or finds no controller the sample is fully synthetic.
pub struct TelemetryProvider {
    probe: Arc<dyn GpuProbe>,
    random: Arc<dyn RandomSource>,
}

impl TelemetryProvider {
    pub fn new(probe: Arc<dyn GpuProbe>, random: Arc<dyn RandomSource>) -> Self {
        Self { probe, random }
    }

    /// Acquire one sample from the first controller, or synthesize one.
    pub async fn acquire(&self) -> TelemetrySample {
        match self.probe.controllers().await {
            Ok(controllers) => match controllers.into_iter().next() {
                Some(controller) => {
                    tracing::debug!(
                        target: "forge.telemetry",
                        probe = self.probe.name(),
                        model = controller.model.as_deref().unwrap_or("?"),
                        "using hardware controller"
                    );
                    self.from_controller(controller)
                }
                None => {
                    tracing::debug!(
                        target: "forge.telemetry",
                        probe = self.probe.name(),
                        "no GPU controller found, synthesizing telemetry"
                    );
                    self.synthetic_sample()
                }
            },
            Err(e) => {
                tracing::warn!(
                    target: "forge.telemetry",
                    probe = self.probe.name(),
                    error = %e,
                    "GPU probe failed, synthesizing telemetry"
                );
                self.synthetic_sample()
            }
        }
    }

    /// Number of controllers the probe reports, 0 when it fails.
    pub async fn gpu_count(&self) -> usize {
        match self.probe.controllers().await {
            Ok(controllers) => controllers.len(),
            Err(e) => {
                tracing::debug!(target: "forge.telemetry", error = %e, "GPU count unavailable");
                0
            }
        }
    }

    /// Sample built only from the synthetic ranges.
    pub fn synthetic_sample(&self) -> TelemetrySample {
        TelemetrySample {
            name: synthetic::NAME.to_string(),
            vendor: synthetic::VENDOR.to_string(),
            driver: synthetic::DRIVER.to_string(),
            temperature: self.draw(synthetic::TEMPERATURE_C) as f64,
            utilization: self.draw(synthetic::UTILIZATION_PCT) as f64,
            memory_used: self.draw(synthetic::MEMORY_USED_MB),
            memory_total: synthetic::MEMORY_TOTAL_MB,
            memory_free: self.draw(synthetic::MEMORY_FREE_MB),
            fan_speed: self.draw(synthetic::FAN_SPEED_PCT) as f64,
            clock_core: self.draw(synthetic::CLOCK_CORE_MHZ) as u32,
            clock_memory: self.draw(synthetic::CLOCK_MEMORY_MHZ) as u32,
            power_draw: self.draw(synthetic::POWER_DRAW_W) as f64,
            power_limit: synthetic::POWER_LIMIT_W,
            pcie_gen: synthetic::PCIE_GEN,
            pcie_width: synthetic::PCIE_WIDTH,
            is_real: false,
        }
    }

    fn from_controller(&self, controller: ControllerDescriptor) -> TelemetrySample {
        TelemetrySample {
            name: controller
                .model
                .unwrap_or_else(|| synthetic::UNKNOWN_NAME.to_string()),
            vendor: controller
                .vendor
                .unwrap_or_else(|| synthetic::UNKNOWN_VENDOR.to_string()),
            driver: controller
                .driver_version
                .unwrap_or_else(|| synthetic::UNKNOWN_DRIVER.to_string()),
            temperature: controller
                .temperature_gpu
                .unwrap_or_else(|| self.draw(synthetic::TEMPERATURE_C) as f64),
            utilization: controller
                .utilization_gpu
                .unwrap_or_else(|| self.draw(synthetic::UTILIZATION_PCT) as f64),
            memory_used: controller
                .memory_used
                .unwrap_or_else(|| self.draw(synthetic::MEMORY_USED_MB)),
            memory_total: controller.memory_total.unwrap_or(synthetic::MEMORY_TOTAL_MB),
            memory_free: controller
                .memory_free
                .unwrap_or_else(|| self.draw(synthetic::MEMORY_FREE_MB)),
            fan_speed: controller
                .fan_speed
                .unwrap_or_else(|| self.draw(synthetic::FAN_SPEED_PCT) as f64),
            clock_core: controller
                .clock_core
                .unwrap_or_else(|| self.draw(synthetic::CLOCK_CORE_MHZ) as u32),
            clock_memory: controller
                .clock_memory
                .unwrap_or_else(|| self.draw(synthetic::CLOCK_MEMORY_MHZ) as u32),
            // The probe contract carries no power or PCIe figures
            power_draw: self.draw(synthetic::POWER_DRAW_W) as f64,
            power_limit: synthetic::POWER_LIMIT_W,
            pcie_gen: synthetic::PCIE_GEN,
            pcie_width: synthetic::PCIE_WIDTH,
            is_real: true,
        }
    }

    fn draw(&self, range: RangeInclusive<u64>) -> u64 {
        self.random.uniform_int(*range.start(), *range.end())
    }
}
