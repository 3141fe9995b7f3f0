//! stream: chunked buffering pipeline between a byte source and a codec.
//!
//! raw chunk → FramingFilter → BlockAligner → codec → LineWrapReflow → writer,
//! with carries handed from one chunk to the next by a single worker.

pub mod aligner;
pub mod framing;
pub mod reflow;
pub mod state;
pub mod pipeline;
pub mod finalizer;
pub mod sequencer;
pub mod io;
pub mod core;

pub use io::{InputSource, OutputSink, SharedBuffer};

pub use self::core::{decode_stream, encode_stream, run_stream, StreamConfig};

pub use pipeline::StreamPipeline;
pub use state::{ChunkFlags, ChunkInput, PipelineState};
