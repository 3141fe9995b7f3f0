//! Base1: unary. The input is one big-endian integer `n`, written as `n`
//! copies of a single character.
//!
//! Output length is the value itself, so only tiny inputs are practical.
//! Leading zero bytes carry no value and do not survive a round trip.

use crate::codecs::types::{apply_case, invalid_char, Codec, CodecError, CodecOptions};

const SYMBOL: u8 = b'A';

/// Largest value accepted for encoding (characters of output).
pub const BASE1_MAX_LEN: u64 = 1 << 24;

pub struct Base1Codec;

impl Base1Codec {
    fn too_large(&self) -> CodecError {
        CodecError::TooLarge { codec: self.name(), limit: BASE1_MAX_LEN }
    }
}

impl Codec for Base1Codec {
    fn name(&self) -> &'static str {
        "base1"
    }

    fn encode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let first = input.iter().position(|&b| b != 0).unwrap_or(input.len());
        let significant = &input[first..];
        if significant.len() > 8 {
            return Err(self.too_large());
        }
        let n = significant.iter().fold(0u64, |acc, &b| acc << 8 | b as u64);
        if n > BASE1_MAX_LEN {
            return Err(self.too_large());
        }
        Ok(apply_case(vec![SYMBOL; n as usize], opts.output_case))
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut n: u64 = 0;
        for (offset, &c) in input.iter().enumerate() {
            if c.eq_ignore_ascii_case(&SYMBOL) {
                n += 1;
            } else if !opts.ignore_garbage {
                return Err(invalid_char(self.name(), input, offset));
            }
        }
        let bytes = n.to_be_bytes();
        let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Ok(bytes[first..].to_vec())
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        input.iter().copied().filter(|c| c.eq_ignore_ascii_case(&SYMBOL)).collect()
    }
}
