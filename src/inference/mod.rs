// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

pub mod benchmark;
pub mod estimator;

pub use benchmark::{
    benchmark_profile, BenchmarkDetails, BenchmarkEstimator, BenchmarkProfile, BenchmarkResult,
};
pub use estimator::{
    base_latency_ms, precision_multiplier, InferenceConfig, InferenceEstimate, InferenceEstimator,
    ModelProfile,
};
