// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Service facade the presentation layer calls into.
//!
//! Wires the telemetry provider, poller, estimator, and chat gateway to one
//! settings store and one random source.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::chat::{ChatExchange, ChatGateway, ChatPreset};
use crate::config::{Settings, SettingsStore};
use crate::error::Result;
use crate::inference::{
    BenchmarkEstimator, BenchmarkProfile, BenchmarkResult, InferenceConfig, InferenceEstimate,
    InferenceEstimator, ModelProfile,
};
use crate::llm::ChatProvider;
use crate::random::{RandomSource, ThreadRandom};
use crate::telemetry::{
    GpuProbe, NvidiaSmiProbe, PolledSample, TelemetryPoller, TelemetryProvider, TelemetrySample,
};

pub struct ForgeService {
    settings: Arc<dyn SettingsStore>,
    telemetry: Arc<TelemetryProvider>,
    poller: TelemetryPoller,
    estimator: InferenceEstimator,
    benchmarks: BenchmarkEstimator,
    chat: ChatGateway,
}

impl ForgeService {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        probe: Arc<dyn GpuProbe>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let telemetry = Arc::new(TelemetryProvider::new(probe, Arc::clone(&random)));
        Self {
            poller: TelemetryPoller::new(Arc::clone(&telemetry)),
            estimator: InferenceEstimator::new(Arc::clone(&random)),
            benchmarks: BenchmarkEstimator::new(Arc::clone(&random)),
            chat: ChatGateway::new(Arc::clone(&settings), random),
            settings,
            telemetry,
        }
    }

    /// `nvidia-smi` probe and thread-local randomness.
    pub fn with_defaults(settings: Arc<dyn SettingsStore>) -> Self {
        Self::new(
            settings,
            Arc::new(NvidiaSmiProbe::new()),
            Arc::new(ThreadRandom),
        )
    }

    /// Route chat through `provider` instead of the settings-selected one.
    pub fn with_chat_provider(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.chat = self.chat.with_provider(provider);
        self
    }

    pub fn settings(&self) -> Settings {
        self.settings.snapshot()
    }

    // Telemetry

    pub async fn acquire_telemetry(&self) -> TelemetrySample {
        self.telemetry.acquire().await
    }

    pub async fn gpu_count(&self) -> usize {
        self.telemetry.gpu_count().await
    }

    /// Start polling at the configured refresh interval.
    pub async fn start_polling(&self) -> Result<()> {
        self.poller.start(self.settings.snapshot().refresh_interval()).await
    }

    /// Re-arm the poller at `period`, cancelling the current timer.
    pub async fn set_poll_interval(&self, period: Duration) -> Result<()> {
        self.poller.restart(period).await
    }

    /// Re-arm the poller at the refresh interval currently in settings.
    pub async fn reload_poll_interval(&self) -> Result<()> {
        self.set_poll_interval(self.settings.snapshot().refresh_interval())
            .await
    }

    pub async fn stop_polling(&self) -> bool {
        self.poller.stop().await
    }

    pub fn subscribe_telemetry(&self) -> watch::Receiver<Option<PolledSample>> {
        self.poller.subscribe()
    }

    pub fn latest_telemetry(&self) -> Option<PolledSample> {
        self.poller.latest()
    }

    // Inference

    pub fn estimate(&self, config: &InferenceConfig) -> InferenceEstimate {
        self.estimator.estimate(config)
    }

    pub fn supported_models(&self) -> &'static [ModelProfile] {
        InferenceEstimator::supported_models()
    }

    pub fn run_benchmark(&self, kind: &str) -> BenchmarkResult {
        self.benchmarks.run(kind)
    }

    pub fn supported_benchmarks(&self) -> &'static [BenchmarkProfile] {
        BenchmarkEstimator::supported_benchmarks()
    }

    // Chat

    pub async fn send_chat(&self, message: &str, model_override: Option<&str>) -> ChatExchange {
        self.chat.send(message, model_override).await
    }

    pub async fn send_preset(
        &self,
        preset_id: &str,
        model_override: Option<&str>,
    ) -> Result<ChatExchange> {
        self.chat.send_preset(preset_id, model_override).await
    }

    pub fn chat_presets(&self) -> &'static [ChatPreset] {
        ChatGateway::presets()
    }
}
