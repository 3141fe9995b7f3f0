//! stream/pipeline.rs
//! Per-chunk step engine: filter, align, convert, reflow, write.
//!
//! A `StreamPipeline` owns the `PipelineState` and the writer. It is driven
//! by exactly one thread (the sequencer worker), so every step sees the
//! state published by the previous one.

use std::io::Write;

use log::{debug, trace};

use crate::codecs::{Codec, CodecDescriptor, Converter, FramingKind, Mode};
use crate::stream::aligner::align;
use crate::stream::core::StreamConfig;
use crate::stream::framing::{opening, FramingFilter};
use crate::stream::reflow::reflow;
use crate::stream::state::PipelineState;
use crate::telemetry::{Stage, TelemetryCounters, TelemetryTimer};
use crate::types::StreamError;

pub struct StreamPipeline<W: Write> {
    pub(super) converter: Converter,
    pub(super) descriptor: CodecDescriptor,
    pub(super) codec: Box<dyn Codec>,
    pub(super) config: StreamConfig,
    pub(super) filter: FramingFilter,
    pub(super) state: PipelineState,
    pub(super) writer: W,
    pub(super) counters: TelemetryCounters,
    pub(super) timer: TelemetryTimer,
    started: bool,
}

impl<W: Write> StreamPipeline<W> {
    pub fn new(converter: Converter, config: StreamConfig, writer: W) -> Self {
        let descriptor = converter.descriptor();
        let filter = FramingFilter::new(descriptor, config.mode, &config.options);
        Self {
            converter,
            descriptor,
            codec: converter.codec(),
            config,
            filter,
            state: PipelineState::default(),
            writer,
            counters: TelemetryCounters::default(),
            timer: TelemetryTimer::new(),
            started: false,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Process one raw chunk.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), StreamError> {
        self.counters.add_chunk(chunk.len());
        self.start()?;

        let codec = self.codec.as_ref();
        let filter = &mut self.filter;
        let cleaned = self.timer.time(Stage::Filter, || filter.clean(chunk, codec));
        trace!(
            "[PIPELINE] chunk {} raw={} cleaned={} held={}",
            self.state.next_chunk,
            chunk.len(),
            cleaned.len(),
            self.filter.held_len()
        );
        self.state.next_chunk += 1;

        self.absorb(cleaned)
    }

    /// Write the opening envelope once, before any payload.
    pub(super) fn start(&mut self) -> Result<(), StreamError> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        if self.config.mode == Mode::Decode {
            return Ok(());
        }

        let head = opening(self.converter, &self.config.options);
        match self.descriptor.framing {
            FramingKind::None => Ok(()),
            // Header line is literal and never wrapped.
            FramingKind::Uuencode => self.write_framing(&head),
            FramingKind::Adobe85 => self.emit_text(&head),
        }
    }

    /// Append cleaned bytes to the carry, convert the aligned prefix.
    fn absorb(&mut self, cleaned: Vec<u8>) -> Result<(), StreamError> {
        let mut buf = std::mem::take(&mut self.state.carry_in);
        if buf.is_empty() {
            buf = cleaned;
        } else {
            buf.extend_from_slice(&cleaned);
        }

        let (descriptor, mode) = (&self.descriptor, self.config.mode);
        let (prefix, carry) = self.timer.time(Stage::Align, || align(buf, descriptor, mode));
        self.check_carry(&carry)?;
        self.counters.observe_carry(carry.len());
        self.state.carry_in = carry;

        if prefix.is_empty() {
            return Ok(());
        }
        let out = self.convert(&prefix)?;
        self.emit(out)
    }

    fn check_carry(&self, carry: &[u8]) -> Result<(), StreamError> {
        let mode = self.config.mode;
        if self.descriptor.multi_byte_units || self.descriptor.is_unbounded(mode) {
            return Ok(());
        }
        if self.descriptor.framing == FramingKind::Uuencode && mode == Mode::Decode {
            debug_assert!(!carry.contains(&b'\n'));
            return Ok(());
        }
        match self.descriptor.block_size(mode) {
            Some(block) if carry.len() >= block => Err(StreamError::Internal(format!(
                "carry of {} bytes for block size {}",
                carry.len(),
                block
            ))),
            _ => Ok(()),
        }
    }

    /// One codec call on aligned (or final) input.
    pub(super) fn convert(&mut self, input: &[u8]) -> Result<Vec<u8>, StreamError> {
        self.counters.add_codec_call();
        let (codec, opts) = (self.codec.as_ref(), &self.config.options);
        let out = match self.config.mode {
            Mode::Encode => self.timer.time(Stage::Encode, || codec.encode(input, opts))?,
            Mode::Decode => self.timer.time(Stage::Decode, || codec.decode(input, opts))?,
        };
        debug!(
            "[PIPELINE] {} {:?} {} -> {} bytes",
            self.converter,
            self.config.mode,
            input.len(),
            out.len()
        );
        Ok(out)
    }

    /// Route codec output to the writer.
    pub(super) fn emit(&mut self, out: Vec<u8>) -> Result<(), StreamError> {
        if out.is_empty() {
            return Ok(());
        }
        let raw = self.config.mode == Mode::Decode
            || self.descriptor.binary_output
            || self.descriptor.framing == FramingKind::Uuencode;
        if raw {
            self.state.wrote_text = true;
            return self.write_payload(&out);
        }
        self.emit_text(&out)
    }

    /// Push encoded text through the line reflow.
    pub(super) fn emit_text(&mut self, text: &[u8]) -> Result<(), StreamError> {
        if text.is_empty() {
            return Ok(());
        }
        let carry = std::mem::take(&mut self.state.carry_out);
        let width = self.config.options.line_wrap;
        let multi_byte = self.descriptor.multi_byte_units;
        let wrapped = self.timer.time(Stage::Reflow, || reflow(text, carry, width, multi_byte));

        self.state.carry_out = wrapped.carry;
        self.state.reached_line_boundary = wrapped.reached_line_boundary;
        self.state.wrote_text = true;
        self.counters.add_lines(wrapped.lines);
        self.write_payload(&wrapped.to_write)
    }

    pub(super) fn write_payload(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let writer = &mut self.writer;
        self.timer.time(Stage::Write, || writer.write_all(bytes))?;
        self.counters.add_output(bytes.len());
        Ok(())
    }

    pub(super) fn write_framing(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        let writer = &mut self.writer;
        self.timer.time(Stage::Write, || writer.write_all(bytes))?;
        self.counters.add_framing(bytes.len());
        Ok(())
    }
}
