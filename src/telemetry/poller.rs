// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Cancellable periodic telemetry acquisition.
//!
//! A single background task calls [`TelemetryProvider::acquire`] once per
//! period and publishes the result on a watch channel. `restart` aborts the
//! running task and waits for it to finish before arming the next one, so a
//! new period never overlaps an acquisition started under the old one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{ForgeError, Result};

use super::provider::TelemetryProvider;
use super::sample::TelemetrySample;

/// A sample as published by the poller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolledSample {
    /// Monotonic across restarts, starting at 1
    pub sequence: u64,
    pub acquired_at: DateTime<Utc>,
    pub sample: TelemetrySample,
}

struct RunningTask {
    period: Duration,
    handle: JoinHandle<()>,
}

pub struct TelemetryPoller {
    provider: Arc<TelemetryProvider>,
    sender: Arc<watch::Sender<Option<PolledSample>>>,
    sequence: Arc<AtomicU64>,
    task: Mutex<Option<RunningTask>>,
}

impl TelemetryPoller {
    pub fn new(provider: Arc<TelemetryProvider>) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            provider,
            sender: Arc::new(sender),
            sequence: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    /// Receiver that observes every published sample.
    pub fn subscribe(&self) -> watch::Receiver<Option<PolledSample>> {
        self.sender.subscribe()
    }

    /// Most recently published sample, if any.
    pub fn latest(&self) -> Option<PolledSample> {
        self.sender.borrow().clone()
    }

    /// Period of the running task.
    pub async fn period(&self) -> Option<Duration> {
        self.task.lock().await.as_ref().map(|t| t.period)
    }

    /// Start polling. The first acquisition fires immediately.
    pub async fn start(&self, period: Duration) -> Result<()> {
        check_period(period)?;
        let mut task = self.task.lock().await;
        if task.is_some() {
            return Err(ForgeError::InvalidInput(
                "telemetry poller is already running".to_string(),
            ));
        }
        *task = Some(self.spawn(period));
        Ok(())
    }

    /// Stop polling. Returns false when nothing was running.
    pub async fn stop(&self) -> bool {
        let mut task = self.task.lock().await;
        match task.take() {
            Some(running) => {
                shutdown(running).await;
                tracing::debug!(target: "forge.poller", "telemetry poller stopped");
                true
            }
            None => false,
        }
    }

    /// Replace the running task (if any) with one using `period`.
    pub async fn restart(&self, period: Duration) -> Result<()> {
        check_period(period)?;
        let mut task = self.task.lock().await;
        if let Some(running) = task.take() {
            shutdown(running).await;
        }
        *task = Some(self.spawn(period));
        Ok(())
    }

    fn spawn(&self, period: Duration) -> RunningTask {
        let provider = Arc::clone(&self.provider);
        let sender = Arc::clone(&self.sender);
        let sequence = Arc::clone(&self.sequence);

        tracing::debug!(
            target: "forge.poller",
            period_ms = period.as_millis() as u64,
            "telemetry poller armed"
        );

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let sample = provider.acquire().await;
                let polled = PolledSample {
                    sequence: sequence.fetch_add(1, Ordering::SeqCst) + 1,
                    acquired_at: Utc::now(),
                    sample,
                };
                tracing::trace!(
                    target: "forge.poller",
                    sequence = polled.sequence,
                    is_real = polled.sample.is_real,
                    "telemetry sample published"
                );
                sender.send_replace(Some(polled));
            }
        });

        RunningTask { period, handle }
    }
}

impl Drop for TelemetryPoller {
    fn drop(&mut self) {
        if let Some(running) = self.task.get_mut().take() {
            running.handle.abort();
        }
    }
}

fn check_period(period: Duration) -> Result<()> {
    if period.is_zero() {
        return Err(ForgeError::InvalidInput(
            "poll period must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

async fn shutdown(running: RunningTask) {
    running.handle.abort();
    match running.handle.await {
        Ok(()) => {}
        Err(e) if e.is_cancelled() => {}
        Err(e) => {
            tracing::warn!(target: "forge.poller", error = %e, "telemetry task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::random::SeededRandom;
    use crate::telemetry::{ControllerDescriptor, GpuProbe};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Counts calls and concurrent calls; each call takes `delay`.
    #[derive(Default)]
    struct CountingProbe {
        delay: Duration,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    struct InFlight<'a>(&'a AtomicUsize);

    impl Drop for InFlight<'_> {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl GpuProbe for CountingProbe {
        fn name(&self) -> &str {
            "counting"
        }

        async fn controllers(&self) -> Result<Vec<ControllerDescriptor>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            let _guard = InFlight(&self.in_flight);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(Vec::new())
        }
    }

    fn poller(probe: Arc<CountingProbe>) -> TelemetryPoller {
        let provider = TelemetryProvider::new(probe, Arc::new(SeededRandom::new(5)));
        TelemetryPoller::new(Arc::new(provider))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_acquires_once_per_period() {
        let probe = Arc::new(CountingProbe::default());
        let poller = poller(Arc::clone(&probe));

        poller.start(Duration::from_millis(2000)).await.unwrap();
        // Ticks at 0, 2000, 4000
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
        assert_eq!(poller.latest().unwrap().sequence, 3);
        assert!(!poller.latest().unwrap().sample.is_real);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_old_timer() {
        let probe = Arc::new(CountingProbe::default());
        let poller = poller(Arc::clone(&probe));

        poller.start(Duration::from_millis(2000)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);

        poller.restart(Duration::from_millis(1000)).await.unwrap();
        // New ticks at 500, 1500, 2500, 3500; the old 2000 tick never fires
        tokio::time::sleep(Duration::from_millis(3100)).await;

        assert_eq!(probe.calls.load(Ordering::SeqCst), 5);
        assert_eq!(poller.period().await, Some(Duration::from_millis(1000)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_never_overlaps_acquisitions() {
        let probe = Arc::new(CountingProbe {
            delay: Duration::from_millis(300),
            ..CountingProbe::default()
        });
        let poller = poller(Arc::clone(&probe));

        poller.start(Duration::from_millis(100)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        // Restart while an acquisition is sleeping inside the probe
        poller.restart(Duration::from_millis(100)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(probe.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(probe.calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_polling() {
        let probe = Arc::new(CountingProbe::default());
        let poller = poller(Arc::clone(&probe));

        poller.start(Duration::from_millis(1000)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(poller.stop().await);
        assert!(poller.period().await.is_none());

        let calls = probe.calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(probe.calls.load(Ordering::SeqCst), calls);
        assert!(!poller.stop().await);
    }

    #[tokio::test]
    async fn test_start_twice_is_rejected() {
        let poller = poller(Arc::new(CountingProbe::default()));
        poller.start(Duration::from_secs(60)).await.unwrap();
        assert!(poller.start(Duration::from_secs(60)).await.is_err());
        poller.stop().await;
    }

    #[tokio::test]
    async fn test_zero_period_is_rejected() {
        let poller = poller(Arc::new(CountingProbe::default()));
        assert!(matches!(
            poller.start(Duration::ZERO).await,
            Err(ForgeError::InvalidInput(_))
        ));
        assert!(poller.restart(Duration::ZERO).await.is_err());
        assert!(poller.period().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_observe_samples() {
        let poller = poller(Arc::new(CountingProbe::default()));
        let mut rx = poller.subscribe();

        poller.start(Duration::from_millis(500)).await.unwrap();
        rx.changed().await.unwrap();
        let first = rx.borrow_and_update().clone().unwrap();
        assert_eq!(first.sequence, 1);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().sequence, 2);
    }
}
