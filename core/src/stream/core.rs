//! stream/core.rs
//! Stable public API: configuration plus the encode/decode entry points.

use std::io::{Read, Write};
use std::thread;

use log::debug;

use crate::codecs::{CodecOptions, Converter, FileMetadata, Mode, OutputCase};
use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_LARGE_INPUT_THRESHOLD, DEFAULT_QUEUE_CAP, MAX_CHUNK_SIZE,
};
use crate::stream::io::{open_input, open_output, read_exact_or_eof, InputSource, OutputSink};
use crate::stream::pipeline::StreamPipeline;
use crate::stream::sequencer::ChunkSequencer;
use crate::types::{StreamError, StreamReport};

#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub mode: Mode,
    pub options: CodecOptions,
    /// Bytes read from the source per chunk.
    pub chunk_size: usize,
    /// Chunks queued ahead of the worker.
    pub queue_capacity: usize,
    /// Unbounded codecs converting more than this raise an advisory.
    pub large_input_threshold: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Encode,
            options: CodecOptions::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAP,
            large_input_threshold: DEFAULT_LARGE_INPUT_THRESHOLD,
        }
    }
}

impl StreamConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_line_wrap(mut self, width: usize) -> Self {
        self.options.line_wrap = width;
        self
    }

    pub fn with_ignore_garbage(mut self, on: bool) -> Self {
        self.options.ignore_garbage = on;
        self
    }

    pub fn with_output_case(mut self, case: OutputCase) -> Self {
        self.options.output_case = case;
        self
    }

    pub fn with_file(mut self, file: FileMetadata) -> Self {
        self.options.file = Some(file);
        self
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn with_queue_capacity(mut self, cap: usize) -> Self {
        self.queue_capacity = cap;
        self
    }

    pub fn with_large_input_threshold(mut self, bytes: usize) -> Self {
        self.large_input_threshold = bytes;
        self
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(StreamError::Validation(format!(
                "invalid chunk size: {}, must be in 1..={}",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        if self.queue_capacity == 0 {
            return Err(StreamError::Validation("queue capacity must be at least 1".into()));
        }
        Ok(())
    }
}

/// Stream `reader` through `converter` into `writer`.
///
/// Reading happens on the calling thread; conversion and writing happen on
/// one worker fed in arrival order.
pub fn run_stream<R, W>(
    converter: Converter,
    mut reader: R,
    writer: W,
    config: &StreamConfig,
) -> Result<StreamReport, StreamError>
where
    R: Read,
    W: Write + Send,
{
    config.validate()?;
    debug!(
        "[PIPELINE] start {} {:?}, chunk {} bytes",
        converter, config.mode, config.chunk_size
    );
    let pipeline = StreamPipeline::new(converter, config.clone(), writer);

    thread::scope(|scope| {
        let mut sequencer = ChunkSequencer::spawn(scope, pipeline, config.queue_capacity);
        let mut chunks = 0u64;
        loop {
            // Dropping the sequencer on error closes the queue and stops the worker.
            let chunk = read_exact_or_eof(&mut reader, config.chunk_size)?;
            if chunk.is_empty() {
                debug!("[READER] EOF after {} chunks", chunks);
                break;
            }
            chunks += 1;
            if let Err(closed) = sequencer.enqueue(chunk) {
                // Surface the worker's own failure rather than the closed queue.
                return Err(sequencer.drain().err().unwrap_or(closed));
            }
        }
        sequencer.drain()
    })
}

/// Encode `input` into `output`.
pub fn encode_stream(
    converter: Converter,
    input: InputSource,
    output: OutputSink,
    config: StreamConfig,
) -> Result<StreamReport, StreamError> {
    let reader = open_input(input)?;
    let writer = open_output(output);
    run_stream(converter, reader, writer, &config.with_mode(Mode::Encode))
}

/// Decode `input` into `output`.
pub fn decode_stream(
    converter: Converter,
    input: InputSource,
    output: OutputSink,
    config: StreamConfig,
) -> Result<StreamReport, StreamError> {
    let reader = open_input(input)?;
    let writer = open_output(output);
    run_stream(converter, reader, writer, &config.with_mode(Mode::Decode))
}
