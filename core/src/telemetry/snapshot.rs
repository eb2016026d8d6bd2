//! telemetry/snapshot.rs
//! Immutable summary of counters and stage timings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::DecompressCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: DecompressCounters,
    /// accepted / total, 0.0 when nothing was seen.
    pub acceptance_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &DecompressCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();
        let total = counters.payloads_total();

        let acceptance_ratio = if total > 0 {
            counters.payloads_accepted as f64 / total as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_decompressed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            acceptance_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// `acceptance_ratio` in [0, 1] and stage time never exceeding wall time.
    pub fn sanity_check(&self) -> bool {
        (0.0..=1.0).contains(&self.acceptance_ratio) && self.total_stage_time() <= self.elapsed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
