//! baseex-core
//!
//! Streaming buffering pipeline for text/byte codecs: chunked input is
//! filtered, block aligned, converted and re-wrapped so that the output is
//! byte-identical to a whole-input conversion.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod codecs;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::codecs::{CodecOptions, Converter, FileMetadata, Mode, OutputCase};
    pub use crate::stream::{
        decode_stream, encode_stream, run_stream, InputSource, OutputSink, SharedBuffer, StreamConfig,
    };
    pub use crate::types::{Diagnostic, StreamError, StreamReport};
}
