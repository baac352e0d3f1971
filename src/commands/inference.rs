// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Inference estimate commands

use crate::cli::args::{BenchArgs, InferArgs, OutputFormat};
use crate::error::Result;
use crate::inference::{
    benchmark_profile, BenchmarkProfile, BenchmarkResult, InferenceConfig, InferenceEstimate,
    InferenceEstimator, ModelProfile,
};
use crate::service::ForgeService;

use super::print_json;

/// Execute the infer command
pub fn execute_infer(service: &ForgeService, args: &InferArgs, format: OutputFormat) -> Result<()> {
    let config = InferenceConfig::new(&args.model, &args.precision, args.batch_size);
    let estimate = service.estimate(&config);

    if format == OutputFormat::Json {
        return print_json(&estimate);
    }

    println!("{}", render_estimate(&estimate));
    Ok(())
}

/// Execute the models command
pub fn execute_models(service: &ForgeService, format: OutputFormat) -> Result<()> {
    let models = service.supported_models();

    if format == OutputFormat::Json {
        return print_json(&models);
    }

    println!("{}", render_models(models));
    Ok(())
}

/// Execute the bench command
pub fn execute_bench(service: &ForgeService, args: &BenchArgs, format: OutputFormat) -> Result<()> {
    if args.list {
        let benchmarks = service.supported_benchmarks();
        if format == OutputFormat::Json {
            return print_json(&benchmarks);
        }
        println!("{}", render_benchmarks(benchmarks));
        return Ok(());
    }

    let result = service.run_benchmark(&args.kind);

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    println!("{}", render_benchmark(&result));
    Ok(())
}

pub fn render_benchmark(result: &BenchmarkResult) -> String {
    let profile = benchmark_profile(&result.benchmark_type);
    let mut out = format!("\n=== {} benchmark ===\n", result.benchmark_type);
    if profile.kind != result.benchmark_type {
        out.push_str(&format!("(unknown type, using the {} profile)\n", profile.kind));
    }
    out.push_str(&format!(
        "\nScore:        {:.0}\nFPS:          {:.1}\nFrame time:   {:.2} ms\nMemory:       {:.2} GB\nTemperature:  {:.1} °C\nIterations:   {}\n\nSimulated run, not measured.",
        result.score,
        result.fps,
        result.details.avg_frame_time_ms,
        result.memory_usage_gb,
        result.temperature,
        result.details.test_iterations
    ));
    out
}

pub fn render_benchmarks(benchmarks: &[BenchmarkProfile]) -> String {
    let mut out = String::from("\n=== Benchmarks ===\n");
    for bench in benchmarks {
        out.push_str(&format!(
            "\n  {:<10} {:<24} score {:>6.0}  {:>4.0} fps  ±{:.0} %",
            bench.kind,
            bench.description,
            bench.base_score,
            bench.base_fps,
            bench.variance * 100.0
        ));
    }
    out
}

pub fn render_estimate(estimate: &InferenceEstimate) -> String {
    format!(
        "\n=== {} @ {} (batch {}) ===\n\nLatency:     {} ms\nThroughput:  {} inferences/s\nMemory:      {} MB\n\nEstimated from reference tables, not measured.",
        estimate.model,
        estimate.precision,
        estimate.batch_size,
        estimate.display_latency(),
        estimate.display_throughput(),
        estimate.memory_mb
    )
}

pub fn render_models(models: &[ModelProfile]) -> String {
    let mut out = String::from("\n=== Supported Models ===\n");
    for model in models {
        out.push_str(&format!(
            "\n  {:<18} {:<28} {:>6.1} ms  ({})",
            model.name, model.category, model.base_latency_ms, model.input
        ));
    }
    let precisions: Vec<&str> = InferenceEstimator::supported_precisions().collect();
    out.push_str(&format!("\n\nPrecisions: {}", precisions.join(", ")));
    out
}
