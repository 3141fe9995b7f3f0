//! stream/aligner.rs
//! Split a cleaned buffer into a codec-ready prefix and a carry.
//!
//! - unbounded codecs carry everything until end of stream
//! - byte-unit codecs split at `len - len % block`
//! - multi-byte codecs count code points and never put an incomplete UTF-8
//!   sequence into the prefix
//! - uuencode decode splits after the last `\n`

use crate::codecs::{CodecDescriptor, FramingKind, Mode};

/// Split `buf` at the aligned boundary. The prefix may be empty.
pub fn align(mut buf: Vec<u8>, descriptor: &CodecDescriptor, mode: Mode) -> (Vec<u8>, Vec<u8>) {
    let at = split_point(&buf, descriptor, mode);
    if at == 0 {
        return (Vec::new(), buf);
    }
    let carry = buf.split_off(at);
    (buf, carry)
}

/// Byte offset where the carry starts.
pub fn split_point(buf: &[u8], descriptor: &CodecDescriptor, mode: Mode) -> usize {
    if descriptor.framing == FramingKind::Uuencode && mode == Mode::Decode {
        return buf.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    }
    let Some(block) = descriptor.block_size(mode) else {
        return 0;
    };
    if block == 0 {
        return 0;
    }
    if descriptor.multi_byte_units && mode == Mode::Decode {
        let starts = unit_starts(buf);
        let complete = starts.len();
        let keep = complete - complete % block;
        return if keep == complete {
            complete_len(buf, &starts)
        } else {
            starts[keep]
        };
    }
    buf.len() - buf.len() % block
}

/// Start offsets of every complete unit. Bytes that do not form a valid
/// sequence count as one unit each; an incomplete trailing sequence is left out.
pub fn unit_starts(buf: &[u8]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(buf.len());
    let mut i = 0;
    while i < buf.len() {
        match unit_width(&buf[i..]) {
            Some(w) => {
                starts.push(i);
                i += w;
            }
            None => break,
        }
    }
    starts
}

/// Length of a trailing UTF-8 sequence that more input could still complete.
pub fn incomplete_tail_len(buf: &[u8]) -> usize {
    let starts = unit_starts(buf);
    buf.len() - complete_len(buf, &starts)
}

fn complete_len(buf: &[u8], starts: &[usize]) -> usize {
    match starts.last() {
        Some(&last) => last + unit_width(&buf[last..]).unwrap_or(0),
        None => 0,
    }
}

/// Width of the unit at the head of `rest`, `None` if it is a truncated sequence.
fn unit_width(rest: &[u8]) -> Option<usize> {
    let lead = rest[0];
    let want = match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Some(1),
    };
    for k in 1..want {
        match rest.get(k) {
            None => return None,
            Some(&b) if b & 0xC0 == 0x80 => {}
            Some(_) => return Some(1),
        }
    }
    Some(want)
}
