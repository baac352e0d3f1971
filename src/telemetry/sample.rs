// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telemetry sample and the synthetic value ranges used to fill it.

use serde::{Deserialize, Serialize};

/// Point-in-time GPU snapshot returned to the dashboard.
///
/// `is_real` is true when a hardware controller was located, even if some
/// fields had to be synthesized; see [`super::TelemetryProvider::acquire`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    pub name: String,
    pub vendor: String,
    pub driver: String,
    /// Core temperature in °C
    pub temperature: f64,
    /// GPU utilization in percent
    pub utilization: f64,
    /// Memory figures in MB
    pub memory_used: u64,
    pub memory_total: u64,
    pub memory_free: u64,
    /// Fan speed in percent
    pub fan_speed: f64,
    /// Clocks in MHz
    pub clock_core: u32,
    pub clock_memory: u32,
    /// Power figures in W
    pub power_draw: f64,
    pub power_limit: f64,
    pub pcie_gen: u8,
    pub pcie_width: u8,
    pub is_real: bool,
}

impl TelemetrySample {
    /// Memory in use as a percentage of total.
    pub fn memory_utilization(&self) -> f64 {
        if self.memory_total == 0 {
            0.0
        } else {
            self.memory_used as f64 / self.memory_total as f64 * 100.0
        }
    }

    /// Power draw as a percentage of the limit.
    pub fn power_utilization(&self) -> f64 {
        if self.power_limit <= 0.0 {
            0.0
        } else {
            self.power_draw / self.power_limit * 100.0
        }
    }
}

/// Bounds for synthesized telemetry fields. Every random field is drawn as a
/// whole number from its inclusive range.
pub mod synthetic {
    use std::ops::RangeInclusive;

    pub const NAME: &str = "NVIDIA GeForce RTX 5090";
    pub const VENDOR: &str = "NVIDIA";
    pub const DRIVER: &str = "560.94";

    pub const TEMPERATURE_C: RangeInclusive<u64> = 45..=75;
    pub const UTILIZATION_PCT: RangeInclusive<u64> = 20..=80;
    pub const MEMORY_USED_MB: RangeInclusive<u64> = 4000..=16000;
    pub const MEMORY_TOTAL_MB: u64 = 32768;
    pub const MEMORY_FREE_MB: RangeInclusive<u64> = 12000..=28000;
    pub const FAN_SPEED_PCT: RangeInclusive<u64> = 30..=70;
    pub const CLOCK_CORE_MHZ: RangeInclusive<u64> = 2400..=2800;
    pub const CLOCK_MEMORY_MHZ: RangeInclusive<u64> = 10000..=11000;
    pub const POWER_DRAW_W: RangeInclusive<u64> = 200..=450;
    pub const POWER_LIMIT_W: f64 = 575.0;
    pub const PCIE_GEN: u8 = 5;
    pub const PCIE_WIDTH: u8 = 16;

    /// Labels used when a located controller does not report its identity.
    pub const UNKNOWN_NAME: &str = "Unknown GPU";
    pub const UNKNOWN_VENDOR: &str = "Unknown";
    pub const UNKNOWN_DRIVER: &str = "N/A";
}
