// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GPU telemetry commands

use std::time::Duration;

use crate::cli::args::{OutputFormat, WatchArgs};
use crate::error::Result;
use crate::service::ForgeService;
use crate::telemetry::TelemetrySample;

use super::print_json;

/// Execute the metrics command
pub async fn execute_metrics(service: &ForgeService, format: OutputFormat) -> Result<()> {
    let sample = service.acquire_telemetry().await;

    if format == OutputFormat::Json {
        return print_json(&sample);
    }

    println!("{}", render_sample(&sample));
    Ok(())
}

/// Execute the watch command; runs until `count` samples or Ctrl-C.
pub async fn execute_watch(
    service: &ForgeService,
    args: &WatchArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut rx = service.subscribe_telemetry();

    match args.interval {
        Some(ms) => service.set_poll_interval(Duration::from_millis(ms)).await?,
        None => service.start_polling().await?,
    }

    let mut seen = 0u64;
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(polled) = rx.borrow_and_update().clone() else {
                    continue;
                };
                if format == OutputFormat::Json {
                    println!("{}", serde_json::to_string(&polled)?);
                } else {
                    println!(
                        "#{} {}  {}",
                        polled.sequence,
                        polled.acquired_at.format("%H:%M:%S"),
                        render_line(&polled.sample)
                    );
                }
                seen += 1;
                if args.count.is_some_and(|count| seen >= count) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    service.stop_polling().await;
    Ok(())
}

/// Multi-line report of one sample
pub fn render_sample(sample: &TelemetrySample) -> String {
    let source = if sample.is_real { "hardware" } else { "synthetic" };
    let mut out = String::new();
    out.push_str(&format!("\n=== {} ({}) ===\n\n", sample.name, source));
    out.push_str(&format!("Vendor:       {}\n", sample.vendor));
    out.push_str(&format!("Driver:       {}\n", sample.driver));
    out.push_str(&format!("Temperature:  {:.0} °C\n", sample.temperature));
    out.push_str(&format!("Utilization:  {:.0} %\n", sample.utilization));
    out.push_str(&format!(
        "Memory:       {} / {} MB used ({:.1} %), {} MB free\n",
        sample.memory_used,
        sample.memory_total,
        sample.memory_utilization(),
        sample.memory_free
    ));
    out.push_str(&format!("Fan:          {:.0} %\n", sample.fan_speed));
    out.push_str(&format!(
        "Clocks:       {} MHz core, {} MHz memory\n",
        sample.clock_core, sample.clock_memory
    ));
    out.push_str(&format!(
        "Power:        {:.0} / {:.0} W ({:.1} %)\n",
        sample.power_draw,
        sample.power_limit,
        sample.power_utilization()
    ));
    out.push_str(&format!(
        "PCIe:         Gen {} x{}",
        sample.pcie_gen, sample.pcie_width
    ));
    out
}

/// One-line summary used by `watch`
pub fn render_line(sample: &TelemetrySample) -> String {
    format!(
        "{:>3.0}°C  {:>3.0}%  {:>5}/{} MB  {:>4.0} W{}",
        sample.temperature,
        sample.utilization,
        sample.memory_used,
        sample.memory_total,
        sample.power_draw,
        if sample.is_real { "" } else { "  (synthetic)" }
    )
}
