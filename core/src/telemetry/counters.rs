//! telemetry/counters.rs
//! Mutable counters collected while chunks flow through the pipeline.
//!
//! Converted into an immutable `TelemetrySnapshot` at finish.
use serde::{Deserialize, Serialize};

/// Deterministic counters collected during stream processing
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub chunks: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub codec_calls: u64,
    /// Largest carry held between two chunks.
    pub carry_high_water: u64,
    pub lines_wrapped: u64,
    /// Header, markers, sentinel and terminators.
    pub bytes_framing: u64,
}

impl TelemetryCounters {
    /// Record one raw chunk entering the pipeline.
    pub fn add_chunk(&mut self, len: usize) {
        self.chunks += 1;
        self.bytes_in += len as u64;
    }

    pub fn add_codec_call(&mut self) {
        self.codec_calls += 1;
    }

    /// Record payload bytes written to the sink.
    pub fn add_output(&mut self, len: usize) {
        self.bytes_out += len as u64;
    }

    /// Record structural bytes written to the sink.
    pub fn add_framing(&mut self, len: usize) {
        self.bytes_framing += len as u64;
        self.bytes_out += len as u64;
    }

    pub fn add_lines(&mut self, lines: usize) {
        self.lines_wrapped += lines as u64;
    }

    pub fn observe_carry(&mut self, len: usize) {
        self.carry_high_water = self.carry_high_water.max(len as u64);
    }
}
