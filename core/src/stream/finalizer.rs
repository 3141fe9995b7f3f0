//! stream/finalizer.rs
//! End-of-stream flush: final codec call, closing envelope, trailing newline.

use std::io::Write;

use log::{debug, warn};

use crate::codecs::{FramingKind, Mode};
use crate::stream::framing::closing;
use crate::stream::pipeline::StreamPipeline;
use crate::telemetry::TelemetrySnapshot;
use crate::types::{Diagnostic, StreamError, StreamReport};

impl<W: Write> StreamPipeline<W> {
    /// Flush every carry and close the envelope. Consumes the pipeline.
    pub fn finish(mut self) -> Result<StreamReport, StreamError> {
        self.start()?;

        let mut diagnostics = Vec::new();
        let mode = self.config.mode;

        let codec = self.codec.as_ref();
        let tail = self.filter.finish(codec);
        let mut carry = std::mem::take(&mut self.state.carry_in);
        carry.extend_from_slice(&tail);

        let threshold = self.config.large_input_threshold;
        if self.descriptor.is_unbounded(mode) && carry.len() > threshold {
            let diag = Diagnostic::LargeUnboundedInput {
                bytes: carry.len(),
                threshold,
                converter: self.converter.name(),
            };
            warn!("[FINALIZER] {diag}");
            diagnostics.push(diag);
        }

        if !carry.is_empty() {
            debug!("[FINALIZER] final codec call on {} carried bytes", carry.len());
            let out = self.convert(&carry)?;
            self.emit(out)?;
        }

        if mode == Mode::Encode {
            self.close_envelope()?;
        }

        self.writer.flush()?;
        self.timer.finish();

        let telemetry = TelemetrySnapshot::from(&self.counters, &self.timer);
        debug!(
            "[FINALIZER] done: {} chunks, {} bytes in, {} bytes out",
            telemetry.chunks, telemetry.bytes_in, telemetry.bytes_out
        );
        Ok(StreamReport { diagnostics, telemetry })
    }

    fn close_envelope(&mut self) -> Result<(), StreamError> {
        let tail = closing(self.converter);
        if self.descriptor.framing == FramingKind::Adobe85 {
            self.emit_text(&tail)?;
        }

        let pending = std::mem::take(&mut self.state.carry_out);
        if !pending.is_empty() {
            self.state.reached_line_boundary = false;
            self.write_payload(&pending)?;
        }

        if self.descriptor.framing == FramingKind::Uuencode {
            return self.write_framing(&tail);
        }
        let needs_newline = self.state.wrote_text
            && !self.state.reached_line_boundary
            && !self.descriptor.binary_output;
        if needs_newline {
            self.write_framing(b"\n")?;
        }
        Ok(())
    }
}
