//! Unsigned LEB128 of the whole input.
//!
//! The input is read as one big-endian integer with a `0x01` byte prepended,
//! so leading zero bytes survive, and written as little-endian 7-bit groups.
//! Output is raw bytes.

use crate::codecs::types::{Codec, CodecError, CodecOptions};

const SENTINEL: u8 = 0x01;
const CONTINUE: u8 = 0x80;

pub struct Leb128Codec;

impl Codec for Leb128Codec {
    fn name(&self) -> &'static str {
        "leb128"
    }

    fn encode(&self, input: &[u8], _opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut groups = Vec::with_capacity((input.len() + 1) * 8 / 7 + 1);
        let mut acc: u32 = 0;
        let mut bits = 0u32;

        // Least significant byte first.
        for &b in input.iter().rev().chain(std::iter::once(&SENTINEL)) {
            acc |= (b as u32) << bits;
            bits += 8;
            while bits >= 7 {
                groups.push((acc & 0x7F) as u8);
                acc >>= 7;
                bits -= 7;
            }
        }
        if bits > 0 {
            groups.push(acc as u8);
        }
        while groups.len() > 1 && groups.last() == Some(&0) {
            groups.pop();
        }

        let last = groups.len() - 1;
        for g in &mut groups[..last] {
            *g |= CONTINUE;
        }
        Ok(groups)
    }

    fn decode(&self, input: &[u8], _opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let end = input
            .iter()
            .position(|&b| b & CONTINUE == 0)
            .ok_or_else(|| CodecError::Malformed {
                codec: self.name(),
                msg: "unterminated value".into(),
            })?;
        if end + 1 != input.len() {
            return Err(CodecError::Malformed {
                codec: self.name(),
                msg: format!("{} trailing bytes after value", input.len() - end - 1),
            });
        }

        let mut le = Vec::with_capacity(input.len() * 7 / 8 + 1);
        let mut acc: u32 = 0;
        let mut bits = 0u32;
        for &g in input {
            acc |= ((g & 0x7F) as u32) << bits;
            bits += 7;
            while bits >= 8 {
                le.push(acc as u8);
                acc >>= 8;
                bits -= 8;
            }
        }
        if acc != 0 {
            le.push(acc as u8);
        }
        while le.last() == Some(&0) {
            le.pop();
        }

        match le.pop() {
            Some(SENTINEL) => {
                le.reverse();
                Ok(le)
            }
            _ => Err(CodecError::Malformed {
                codec: self.name(),
                msg: "missing length sentinel".into(),
            }),
        }
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        // Every byte value is payload.
        input.to_vec()
    }
}
