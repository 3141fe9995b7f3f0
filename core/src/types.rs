use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::codecs::CodecError;
use crate::telemetry::TelemetrySnapshot;

/// Unified stream error covering I/O, codec failures and pipeline bookkeeping.
/// - `From<T>` impls let `?` flow from codec and I/O layers.
/// - `Read` is kept apart from `Io` so callers can tell input failures from
///   output failures.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Writing to the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reading from the source failed.
    #[error("read error: {0}")]
    Read(io::Error),

    #[error("{0}")]
    Codec(#[from] CodecError),

    /// The worker went away before the stream was drained.
    #[error("pipeline error: {0}")]
    PipelineClosed(&'static str),

    /// Broken carry or ordering bookkeeping.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Non-fatal advisory raised while processing a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// An unbounded codec had to convert more than `threshold` bytes in one call.
    LargeUnboundedInput {
        bytes: usize,
        threshold: usize,
        converter: &'static str,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::LargeUnboundedInput { bytes, threshold, converter } => write!(
                f,
                "{converter} buffered {bytes} bytes (over {threshold}); \
                 this algorithm is not designed for large streaming input and may be slow"
            ),
        }
    }
}

/// Outcome of one stream run.
#[derive(Debug, Clone)]
pub struct StreamReport {
    pub diagnostics: Vec<Diagnostic>,
    pub telemetry: TelemetrySnapshot,
}
