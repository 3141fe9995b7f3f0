//! UUencode / XXencode data lines.
//!
//! Encode: every 45 payload bytes become one line: a length character, 60
//! characters for 15 three-byte groups, `\n`. A shorter final line covers the
//! remainder. Decode: one line at a time; a zero length line is the sentinel
//! and carries no data.
//!
//! Header (`begin …`), sentinel and `end` lines are emitted and consumed by the
//! stream framing layer.

use crate::codecs::types::{build_decode_table, Codec, CodecError, CodecOptions};
use crate::constants::UU_LINE_BYTES;

const XX_ALPHABET: &[u8; 64] = b"+-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UuVariant {
    Uu,
    Xx,
}

pub struct UuCodec {
    variant: UuVariant,
    decode_table: [u8; 256],
}

impl UuCodec {
    pub fn new(variant: UuVariant) -> Self {
        let decode_table = match variant {
            UuVariant::Uu => {
                // ' ' and '`' both stand for zero.
                let mut t = [0xFFu8; 256];
                for c in 32u8..=96 {
                    t[c as usize] = (c - 32) & 0x3F;
                }
                t
            }
            UuVariant::Xx => build_decode_table(XX_ALPHABET),
        };
        Self { variant, decode_table }
    }

    #[inline]
    fn symbol(&self, v: u8) -> u8 {
        match self.variant {
            UuVariant::Uu if v == 0 => b'`',
            UuVariant::Uu => v + 32,
            UuVariant::Xx => XX_ALPHABET[v as usize],
        }
    }

    /// The zero-length line closing the payload.
    pub fn sentinel_line(&self) -> Vec<u8> {
        vec![self.symbol(0), b'\n']
    }

    fn encode_line(&self, payload: &[u8], out: &mut Vec<u8>) {
        out.push(self.symbol(payload.len() as u8));
        for group in payload.chunks(3) {
            let mut buf = [0u8; 3];
            buf[..group.len()].copy_from_slice(group);
            let v = (buf[0] as u32) << 16 | (buf[1] as u32) << 8 | buf[2] as u32;
            for shift in [18, 12, 6, 0] {
                out.push(self.symbol(((v >> shift) & 0x3F) as u8));
            }
        }
        out.push(b'\n');
    }

    fn decode_line(&self, line: &[u8], line_offset: usize, opts: &CodecOptions, out: &mut Vec<u8>) -> Result<(), CodecError> {
        let Some((&len_char, body)) = line.split_first() else {
            return Ok(());
        };
        let expected = match self.decode_table[len_char as usize] {
            0xFF if opts.ignore_garbage => return Ok(()),
            0xFF => return Err(self.invalid(len_char, line_offset)),
            n => n as usize,
        };
        if expected == 0 {
            return Ok(());
        }

        let mut values = Vec::with_capacity(body.len());
        for (i, &c) in body.iter().enumerate() {
            match self.decode_table[c as usize] {
                0xFF if opts.ignore_garbage => continue,
                0xFF => return Err(self.invalid(c, line_offset + 1 + i)),
                v => values.push(v),
            }
        }

        let mut decoded = Vec::with_capacity(values.len() / 4 * 3 + 3);
        for group in values.chunks(4) {
            let mut buf = [0u8; 4];
            buf[..group.len()].copy_from_slice(group);
            let v = (buf[0] as u32) << 18 | (buf[1] as u32) << 12 | (buf[2] as u32) << 6 | buf[3] as u32;
            decoded.extend_from_slice(&[(v >> 16) as u8, (v >> 8) as u8, v as u8]);
        }
        if decoded.len() < expected {
            return Err(CodecError::Malformed {
                codec: self.name(),
                msg: format!("line announces {} bytes, carries {}", expected, decoded.len()),
            });
        }
        out.extend_from_slice(&decoded[..expected]);
        Ok(())
    }

    fn invalid(&self, c: u8, offset: usize) -> CodecError {
        CodecError::InvalidCharacter { codec: self.name(), found: c as char, offset }
    }
}

impl Codec for UuCodec {
    fn name(&self) -> &'static str {
        match self.variant {
            UuVariant::Uu => "uuencode",
            UuVariant::Xx => "xxencode",
        }
    }

    fn encode(&self, input: &[u8], _opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity((input.len() / UU_LINE_BYTES + 1) * 62);
        for line in input.chunks(UU_LINE_BYTES) {
            self.encode_line(line, &mut out);
        }
        Ok(out)
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(input.len() / 4 * 3);
        let mut offset = 0;
        for line in input.split(|&b| b == b'\n') {
            let trimmed = line.strip_suffix(b"\r").unwrap_or(line);
            self.decode_line(trimmed, offset, opts, &mut out)?;
            offset += line.len() + 1;
        }
        Ok(out)
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        // Line structure is payload here.
        input
            .iter()
            .copied()
            .filter(|&c| c == b'\n' || self.decode_table[c as usize] != 0xFF)
            .collect()
    }
}
