// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GPU telemetry: probes, the acquiring provider, and the periodic poller.

pub mod poller;
pub mod probe;
pub mod provider;
pub mod sample;

pub use poller::{PolledSample, TelemetryPoller};
pub use probe::{ControllerDescriptor, GpuProbe, NoGpuProbe, NvidiaSmiProbe};
pub use provider::TelemetryProvider;
pub use sample::{synthetic, TelemetrySample};
