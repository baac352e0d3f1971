// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Table-driven inference latency and throughput estimates.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::random::{RandomSource, ThreadRandom};

/// Base latency in milliseconds for models missing from the table.
pub const DEFAULT_BASE_LATENCY_MS: f64 = 5.0;

/// Precision multiplier for precisions missing from the table.
pub const DEFAULT_PRECISION_MULTIPLIER: f64 = 1.0;

/// Bounds of the placeholder memory figure, in MB.
pub const MEMORY_ESTIMATE_MB: std::ops::RangeInclusive<u64> = 1000..=3000;

/// Model catalogue entry: base latency at FP32, batch size 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    pub name: &'static str,
    pub category: &'static str,
    pub input: &'static str,
    pub base_latency_ms: f64,
}

const MODELS: &[ModelProfile] = &[
    ModelProfile {
        name: "ResNet-50",
        category: "Image Classification",
        input: "224x224 RGB image",
        base_latency_ms: 2.5,
    },
    ModelProfile {
        name: "YOLOv8",
        category: "Object Detection",
        input: "640x640 RGB image",
        base_latency_ms: 8.3,
    },
    ModelProfile {
        name: "BERT",
        category: "Natural Language Processing",
        input: "512-token sequence",
        base_latency_ms: 6.4,
    },
    ModelProfile {
        name: "GPT-2",
        category: "Text Generation",
        input: "1024-token context",
        base_latency_ms: 18.7,
    },
    ModelProfile {
        name: "Stable Diffusion",
        category: "Image Generation",
        input: "512x512 latent, 50 steps",
        base_latency_ms: 45.2,
    },
];

const PRECISIONS: &[(&str, f64)] = &[("FP32", 1.0), ("FP16", 0.55), ("INT8", 0.35)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub model: String,
    pub precision: String,
    pub batch_size: u32,
}

impl InferenceConfig {
    pub fn new(model: impl Into<String>, precision: impl Into<String>, batch_size: u32) -> Self {
        Self {
            model: model.into(),
            precision: precision.into(),
            batch_size,
        }
    }
}

/// Synthetic estimate; `is_real` is always false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceEstimate {
    pub model: String,
    pub precision: String,
    pub batch_size: u32,
    pub latency_ms: f64,
    /// Inferences per second
    pub throughput: f64,
    pub memory_mb: u64,
    pub is_real: bool,
}

impl InferenceEstimate {
    /// Latency with two decimals, e.g. "18.70"
    pub fn display_latency(&self) -> String {
        format!("{:.2}", self.latency_ms)
    }

    /// Throughput with one decimal, e.g. "53.5"
    pub fn display_throughput(&self) -> String {
        format!("{:.1}", self.throughput)
    }
}

/// Base latency for `model`, exact match, with the unknown-model default.
pub fn base_latency_ms(model: &str) -> f64 {
    MODELS
        .iter()
        .find(|m| m.name == model)
        .map(|m| m.base_latency_ms)
        .unwrap_or(DEFAULT_BASE_LATENCY_MS)
}

/// Multiplier for `precision`, exact match, with the unknown default.
pub fn precision_multiplier(precision: &str) -> f64 {
    PRECISIONS
        .iter()
        .find(|(name, _)| *name == precision)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(DEFAULT_PRECISION_MULTIPLIER)
}

pub struct InferenceEstimator {
    random: Arc<dyn RandomSource>,
}

impl Default for InferenceEstimator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl InferenceEstimator {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Models with a latency table entry.
    pub fn supported_models() -> &'static [ModelProfile] {
        MODELS
    }

    /// Precisions with a multiplier table entry.
    pub fn supported_precisions() -> impl Iterator<Item = &'static str> {
        PRECISIONS.iter().map(|(name, _)| *name)
    }

    pub fn estimate(&self, config: &InferenceConfig) -> InferenceEstimate {
        let latency_ms = base_latency_ms(&config.model) * precision_multiplier(&config.precision);
        let throughput = (1000.0 / latency_ms) * config.batch_size as f64;
        let memory_mb = self
            .random
            .uniform_int(*MEMORY_ESTIMATE_MB.start(), *MEMORY_ESTIMATE_MB.end());

        tracing::debug!(
            target: "forge.inference",
            model = %config.model,
            precision = %config.precision,
            batch_size = config.batch_size,
            latency_ms,
            "inference estimate"
        );

        InferenceEstimate {
            model: config.model.clone(),
            precision: config.precision.clone(),
            batch_size: config.batch_size,
            latency_ms,
            throughput,
            memory_mb,
            is_real: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;
    use proptest::prelude::*;

    fn estimator() -> InferenceEstimator {
        InferenceEstimator::new(Arc::new(SeededRandom::new(1)))
    }

    #[test]
    fn test_resnet_fp16() {
        let estimate = estimator().estimate(&InferenceConfig::new("ResNet-50", "FP16", 8));

        assert!((estimate.latency_ms - 1.375).abs() < 1e-9);
        assert!((estimate.throughput - (1000.0 / 1.375) * 8.0).abs() < 1e-6);
        assert!(!estimate.is_real);
        assert_eq!(estimate.batch_size, 8);
    }

    #[test]
    fn test_table_values() {
        assert_eq!(base_latency_ms("YOLOv8"), 8.3);
        assert_eq!(base_latency_ms("BERT"), 6.4);
        assert_eq!(base_latency_ms("GPT-2"), 18.7);
        assert_eq!(base_latency_ms("Stable Diffusion"), 45.2);
        assert_eq!(precision_multiplier("FP32"), 1.0);
        assert_eq!(precision_multiplier("INT8"), 0.35);
    }

    #[test]
    fn test_lookups_are_exact() {
        assert_eq!(base_latency_ms("resnet-50"), DEFAULT_BASE_LATENCY_MS);
        assert_eq!(precision_multiplier("fp16"), DEFAULT_PRECISION_MULTIPLIER);
    }

    #[test]
    fn test_display_precision() {
        let estimate = estimator().estimate(&InferenceConfig::new("GPT-2", "FP32", 1));
        assert_eq!(estimate.display_latency(), "18.70");
        assert_eq!(estimate.display_throughput(), "53.5");
    }

    #[test]
    fn test_zero_batch_gives_zero_throughput() {
        let estimate = estimator().estimate(&InferenceConfig::new("BERT", "FP32", 0));
        assert_eq!(estimate.throughput, 0.0);
    }

    #[test]
    fn test_supported_models_catalogue() {
        let names: Vec<_> = InferenceEstimator::supported_models()
            .iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(
            names,
            ["ResNet-50", "YOLOv8", "BERT", "GPT-2", "Stable Diffusion"]
        );
        assert_eq!(
            InferenceEstimator::supported_precisions().collect::<Vec<_>>(),
            ["FP32", "FP16", "INT8"]
        );
    }

    #[test]
    fn test_estimate_json_keeps_full_precision() {
        let estimate = estimator().estimate(&InferenceConfig::new("ResNet-50", "FP16", 1));
        let json = serde_json::to_value(&estimate).unwrap();
        let latency = json["latencyMs"].as_f64().unwrap();
        assert!((latency - 1.375).abs() < 1e-9);
        assert_ne!(latency.to_string(), estimate.display_latency());
        assert_eq!(json["isReal"], false);
    }

    proptest! {
        #[test]
        fn prop_unknown_model_uses_default_base(
            model in "[a-z]{1,12}",
            precision in prop::sample::select(vec!["FP32", "FP16", "INT8"]),
            batch in 1u32..1024,
        ) {
            let estimate = estimator().estimate(&InferenceConfig::new(model, precision, batch));
            let expected = DEFAULT_BASE_LATENCY_MS * precision_multiplier(precision);
            prop_assert!((estimate.latency_ms - expected).abs() < 1e-9);
        }

        #[test]
        fn prop_unknown_precision_uses_unit_multiplier(
            model in prop::sample::select(vec!["ResNet-50", "YOLOv8", "BERT", "GPT-2", "Stable Diffusion"]),
            precision in "[a-z0-9]{1,6}",
        ) {
            let estimate = estimator().estimate(&InferenceConfig::new(model, precision, 1));
            prop_assert_eq!(estimate.latency_ms, base_latency_ms(model));
        }

        #[test]
        fn prop_throughput_scales_with_batch(batch in 1u32..4096) {
            let one = estimator().estimate(&InferenceConfig::new("GPT-2", "INT8", 1));
            let many = estimator().estimate(&InferenceConfig::new("GPT-2", "INT8", batch));
            prop_assert!((many.throughput - one.throughput * batch as f64).abs() < 1e-6 * batch as f64);
            prop_assert!(MEMORY_ESTIMATE_MB.contains(&many.memory_mb));
        }
    }
}
