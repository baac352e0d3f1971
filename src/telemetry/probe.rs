// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Hardware probes that report GPU controller descriptors.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::{ForgeError, Result};

/// Fields a probe may report for one controller. `None` means the probe did
/// not report the field; zero is a valid reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControllerDescriptor {
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub driver_version: Option<String>,
    pub temperature_gpu: Option<f64>,
    pub utilization_gpu: Option<f64>,
    pub memory_used: Option<u64>,
    pub memory_total: Option<u64>,
    pub memory_free: Option<u64>,
    pub fan_speed: Option<f64>,
    pub clock_core: Option<u32>,
    pub clock_memory: Option<u32>,
}

/// Best-effort system-information query for GPU controllers.
#[async_trait]
pub trait GpuProbe: Send + Sync {
    /// Probe name for logs (e.g. "nvidia-smi")
    fn name(&self) -> &str;

    /// Zero or more controllers, first one is the primary GPU.
    async fn controllers(&self) -> Result<Vec<ControllerDescriptor>>;
}

/// Probe for hosts without a GPU; always reports no controllers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGpuProbe;

#[async_trait]
impl GpuProbe for NoGpuProbe {
    fn name(&self) -> &str {
        "none"
    }

    async fn controllers(&self) -> Result<Vec<ControllerDescriptor>> {
        Ok(Vec::new())
    }
}

const NVIDIA_SMI_QUERY: &str = "name,driver_version,temperature.gpu,utilization.gpu,memory.used,memory.total,memory.free,fan.speed,clocks.gr,clocks.mem";

/// Fields in `NVIDIA_SMI_QUERY`.
const QUERY_COLUMNS: usize = 10;

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Reads controllers from `nvidia-smi` CSV output.
#[derive(Debug, Clone)]
pub struct NvidiaSmiProbe {
    binary: PathBuf,
    timeout: Duration,
}

impl Default for NvidiaSmiProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl NvidiaSmiProbe {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("nvidia-smi"),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Use a specific `nvidia-smi` binary
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }
}

#[async_trait]
impl GpuProbe for NvidiaSmiProbe {
    fn name(&self) -> &str {
        "nvidia-smi"
    }

    async fn controllers(&self) -> Result<Vec<ControllerDescriptor>> {
        let query = format!("--query-gpu={}", NVIDIA_SMI_QUERY);
        let mut command = Command::new(&self.binary);
        command
            .args([query.as_str(), "--format=csv,noheader,nounits"])
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ForgeError::Probe(format!(
                    "{} not found",
                    self.binary.display()
                )))
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                return Err(ForgeError::Probe(format!(
                    "{} did not answer within {:?}",
                    self.binary.display(),
                    self.timeout
                )))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ForgeError::Probe(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(parse_nvidia_smi_csv(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `--format=csv,noheader,nounits` output, one controller per line.
/// Lines with fewer columns than queried are skipped. Cells are taken from
/// the right so a product name containing commas stays whole.
pub(crate) fn parse_nvidia_smi_csv(output: &str) -> Vec<ControllerDescriptor> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut cells: Vec<&str> = line.rsplitn(QUERY_COLUMNS, ',').map(str::trim).collect();
            if cells.len() < QUERY_COLUMNS {
                return None;
            }
            cells.reverse();
            Some(ControllerDescriptor {
                model: text_cell(cells[0]),
                vendor: Some("NVIDIA".to_string()),
                driver_version: text_cell(cells[1]),
                temperature_gpu: number_cell(cells[2]),
                utilization_gpu: number_cell(cells[3]),
                memory_used: number_cell(cells[4]),
                memory_total: number_cell(cells[5]),
                memory_free: number_cell(cells[6]),
                fan_speed: number_cell(cells[7]),
                clock_core: number_cell(cells[8]),
                clock_memory: number_cell(cells[9]),
            })
        })
        .collect()
}

/// Empty, `N/A`, or any bracketed marker such as `[N/A]` or `[Not Supported]`.
fn is_unavailable(cell: &str) -> bool {
    cell.is_empty()
        || cell.eq_ignore_ascii_case("N/A")
        || (cell.starts_with('[') && cell.ends_with(']'))
}

fn text_cell(cell: &str) -> Option<String> {
    (!is_unavailable(cell)).then(|| cell.to_string())
}

fn number_cell<T: std::str::FromStr>(cell: &str) -> Option<T> {
    if is_unavailable(cell) {
        None
    } else {
        cell.parse().ok()
    }
}
