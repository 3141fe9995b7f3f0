//! stream/framing.rs
//! Pre-clean decode input and produce envelope bytes on encode.
//!
//! The filter is stateful: markers and header lines may straddle chunk
//! boundaries, so undecidable bytes are held until the next chunk (or
//! `finish`) settles them. Concatenating every `clean` output plus `finish`
//! equals cleaning the whole input at once.

use crate::codecs::{Codec, CodecDescriptor, CodecOptions, Converter, FramingKind, Mode};
use crate::constants::{markers, stdin_meta};
use crate::stream::aligner::incomplete_tail_len;

/// Ascii85 digit range; `z` and anything else is not part of a group.
const ADOBE_DIGITS: std::ops::RangeInclusive<u8> = b'!'..=b'u';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdobeState {
    /// Before any payload; a leading `<~` is dropped.
    Open,
    Body,
    /// Past `~>`; everything is discarded.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UuState {
    /// First line, may be a `begin` header.
    Header,
    /// Inside the header line, skipping to its `\n`.
    SkipHeader,
    Body,
    /// Past the `end` line.
    Done,
}

pub struct FramingFilter {
    mode: Mode,
    descriptor: CodecDescriptor,
    ignore_garbage: bool,
    held: Vec<u8>,
    adobe: AdobeState,
    /// Payload characters seen so far in the current Ascii85 group.
    adobe_group: usize,
    uu: UuState,
    at_line_start: bool,
}

impl FramingFilter {
    pub fn new(descriptor: CodecDescriptor, mode: Mode, opts: &CodecOptions) -> Self {
        Self {
            mode,
            descriptor,
            ignore_garbage: opts.ignore_garbage,
            held: Vec::new(),
            adobe: AdobeState::Open,
            adobe_group: 0,
            uu: UuState::Header,
            at_line_start: true,
        }
    }

    /// Clean one raw chunk. Encode input and binary decode input pass through.
    pub fn clean(&mut self, chunk: &[u8], codec: &dyn Codec) -> Vec<u8> {
        self.run(chunk, false, codec)
    }

    /// Release whatever is still held at end of stream.
    pub fn finish(&mut self, codec: &dyn Codec) -> Vec<u8> {
        self.run(&[], true, codec)
    }

    pub fn held_len(&self) -> usize {
        self.held.len()
    }

    fn run(&mut self, chunk: &[u8], eof: bool, codec: &dyn Codec) -> Vec<u8> {
        if self.mode == Mode::Encode || self.descriptor.binary_output {
            return chunk.to_vec();
        }

        let mut data = std::mem::take(&mut self.held);
        match self.descriptor.framing {
            FramingKind::Uuencode => {
                data.extend(chunk.iter().copied().filter(|&b| b != b'\r'));
            }
            _ => {
                data.extend(chunk.iter().copied().filter(|&b| b != b'\r' && b != b'\n'));
            }
        }

        let cleaned = match self.descriptor.framing {
            FramingKind::None => data,
            FramingKind::Adobe85 => self.clean_adobe(data, eof),
            FramingKind::Uuencode => self.clean_uu(data, eof),
        };

        if !self.ignore_garbage {
            return cleaned;
        }
        self.strip(cleaned, eof, codec)
    }

    fn strip(&mut self, mut cleaned: Vec<u8>, eof: bool, codec: &dyn Codec) -> Vec<u8> {
        if self.descriptor.multi_byte_units && !eof {
            let tail = incomplete_tail_len(&cleaned);
            if tail > 0 {
                let keep = cleaned.len() - tail;
                let mut held = cleaned.split_off(keep);
                // Bytes held by the framing step follow this tail.
                held.extend_from_slice(&self.held);
                self.held = held;
            }
        }
        codec.strip_garbage(&cleaned)
    }

    fn clean_adobe(&mut self, data: Vec<u8>, eof: bool) -> Vec<u8> {
        let mut body: &[u8] = &data;

        if self.adobe == AdobeState::Open {
            if body.is_empty() {
                return Vec::new();
            }
            if body.starts_with(markers::ADOBE_OPEN) {
                body = &body[markers::ADOBE_OPEN.len()..];
            } else if !eof && markers::ADOBE_OPEN.starts_with(body) {
                self.held = body.to_vec();
                return Vec::new();
            }
            self.adobe = AdobeState::Body;
        }

        if self.adobe == AdobeState::Closed {
            return Vec::new();
        }

        if let Some(pos) = find(body, markers::ADOBE_CLOSE) {
            body = &body[..pos];
            self.adobe = AdobeState::Closed;
        } else if !eof && body.last() == Some(&markers::ADOBE_CLOSE[0]) {
            self.held = vec![markers::ADOBE_CLOSE[0]];
            body = &body[..body.len() - 1];
        }

        // `z` only stands for a zero group at a group boundary. Anywhere else
        // it is left in place for the codec to reject.
        let mut out = Vec::with_capacity(body.len());
        for &b in body {
            if b == markers::ADOBE_ZERO_RUN && self.adobe_group == 0 {
                out.extend_from_slice(markers::ADOBE_ZERO_GROUP);
                continue;
            }
            if ADOBE_DIGITS.contains(&b) {
                self.adobe_group = (self.adobe_group + 1) % 5;
            }
            out.push(b);
        }
        out
    }

    fn clean_uu(&mut self, data: Vec<u8>, eof: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len());
        let mut i = 0;

        while i < data.len() {
            let rest = &data[i..];
            match self.uu {
                UuState::Done => break,
                UuState::SkipHeader => match rest.iter().position(|&b| b == b'\n') {
                    Some(p) => {
                        i += p + 1;
                        self.uu = UuState::Body;
                        self.at_line_start = true;
                    }
                    None => break,
                },
                // Leading blank lines before the header are ignored.
                UuState::Header if matches!(rest[0], b'\n' | b' ' | b'\t') => i += 1,
                UuState::Header => {
                    if rest.starts_with(markers::UU_BEGIN) {
                        self.uu = UuState::SkipHeader;
                    } else if !eof && markers::UU_BEGIN.starts_with(rest) {
                        self.held = rest.to_vec();
                        break;
                    } else {
                        self.uu = UuState::Body;
                    }
                }
                UuState::Body if self.at_line_start => match end_line(rest, eof) {
                    LineKind::End => self.uu = UuState::Done,
                    LineKind::Undecided => {
                        self.held = rest.to_vec();
                        break;
                    }
                    LineKind::Data => self.at_line_start = false,
                },
                UuState::Body => match rest.iter().position(|&b| b == b'\n') {
                    Some(p) => {
                        out.extend_from_slice(&rest[..=p]);
                        i += p + 1;
                        self.at_line_start = true;
                    }
                    None => {
                        out.extend_from_slice(rest);
                        break;
                    }
                },
            }
        }
        out
    }
}

enum LineKind {
    End,
    Data,
    Undecided,
}

/// Classify a line start against the literal `end` line.
fn end_line(rest: &[u8], eof: bool) -> LineKind {
    let end = markers::UU_END;
    if rest.len() <= end.len() {
        if end.starts_with(rest) {
            return match (eof, rest.len() == end.len()) {
                (true, true) => LineKind::End,
                (true, false) => LineKind::Data,
                (false, _) => LineKind::Undecided,
            };
        }
        return LineKind::Data;
    }
    if rest.starts_with(end) && matches!(rest[end.len()], b'\n' | b' ' | b'\t') {
        LineKind::End
    } else {
        LineKind::Data
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Envelope bytes written before any encoded payload.
pub fn opening(converter: Converter, opts: &CodecOptions) -> Vec<u8> {
    match converter.descriptor().framing {
        FramingKind::None => Vec::new(),
        FramingKind::Adobe85 => markers::ADOBE_OPEN.to_vec(),
        FramingKind::Uuencode => {
            let (perm, name) = match &opts.file {
                Some(meta) => (meta.permissions.as_str(), meta.name.as_str()),
                None => (stdin_meta::PERMISSIONS, stdin_meta::NAME),
            };
            format!("begin {perm} {name}\n").into_bytes()
        }
    }
}

/// Envelope bytes written after the last encoded payload.
pub fn closing(converter: Converter) -> Vec<u8> {
    match converter.descriptor().framing {
        FramingKind::None => Vec::new(),
        FramingKind::Adobe85 => markers::ADOBE_CLOSE.to_vec(),
        FramingKind::Uuencode => {
            let mut out = converter.uu_sentinel().unwrap_or_default();
            out.extend_from_slice(markers::UU_END);
            out.push(b'\n');
            out
        }
    }
}
