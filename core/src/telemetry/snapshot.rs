//! telemetry/snapshot.rs
//! Immutable view of one stream run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub chunks: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub bytes_framing: u64,
    pub codec_calls: u64,
    pub carry_high_water: u64,
    pub lines_wrapped: u64,
    /// `bytes_out / bytes_in`, 0 for empty input.
    pub expansion_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let expansion_ratio = if counters.bytes_in > 0 {
            counters.bytes_out as f64 / counters.bytes_in as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_in as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            chunks: counters.chunks,
            bytes_in: counters.bytes_in,
            bytes_out: counters.bytes_out,
            bytes_framing: counters.bytes_framing,
            codec_calls: counters.codec_calls,
            carry_high_water: counters.carry_high_water,
            lines_wrapped: counters.lines_wrapped,
            expansion_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.iter().map(|(_, d)| *d).sum()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        expected.iter().all(|s| self.stage_times.contains(*s))
    }

    /// Internal consistency: framing is part of output, stages fit in elapsed.
    pub fn sanity_check(&self) -> bool {
        self.bytes_framing <= self.bytes_out && self.total_stage_time() <= self.elapsed
    }
}
