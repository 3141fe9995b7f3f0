//! Base85 family: Adobe (framed, `z` escape), plain Ascii85 and Z85.
//!
//! 4 input bytes map to 5 characters, most significant digit first. A k-byte
//! tail is zero padded and emitted as k+1 characters; decode pads a short
//! group with the highest digit and keeps m-1 bytes.
//!
//! The Adobe envelope markers belong to the stream framing layer. The framing
//! layer also expands `z` before alignment; a `z` reaching this codec at a group
//! boundary is still accepted.

use crate::codecs::types::{build_decode_table, invalid_char, Codec, CodecError, CodecOptions};
use crate::constants::markers::ADOBE_ZERO_RUN;

const Z85_ALPHABET: &[u8; 85] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base85Variant {
    Adobe,
    Ascii85,
    Z85,
}

pub struct Base85Codec {
    variant: Base85Variant,
    alphabet: [u8; 85],
    decode_table: [u8; 256],
}

impl Base85Codec {
    pub fn new(variant: Base85Variant) -> Self {
        let mut alphabet = [0u8; 85];
        match variant {
            Base85Variant::Adobe | Base85Variant::Ascii85 => {
                for (i, slot) in alphabet.iter_mut().enumerate() {
                    *slot = b'!' + i as u8;
                }
            }
            Base85Variant::Z85 => alphabet.copy_from_slice(Z85_ALPHABET),
        }
        let decode_table = build_decode_table(&alphabet);
        Self { variant, alphabet, decode_table }
    }

    fn encode_group(&self, group: &[u8], out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        buf[..group.len()].copy_from_slice(group);
        let mut v = u32::from_be_bytes(buf);

        if self.variant == Base85Variant::Adobe && group.len() == 4 && v == 0 {
            out.push(ADOBE_ZERO_RUN);
            return;
        }

        let mut digits = [0u8; 5];
        for d in digits.iter_mut().rev() {
            *d = self.alphabet[(v % 85) as usize];
            v /= 85;
        }
        out.extend_from_slice(&digits[..group.len() + 1]);
    }

    fn decode_group(&self, digits: &[u8], out: &mut Vec<u8>) -> Result<(), CodecError> {
        if digits.len() == 1 {
            return Err(CodecError::Malformed {
                codec: self.name(),
                msg: "dangling single character group".into(),
            });
        }
        let mut v: u64 = 0;
        for i in 0..5 {
            let d = digits.get(i).copied().unwrap_or(84);
            v = v * 85 + d as u64;
        }
        if v > u32::MAX as u64 {
            return Err(CodecError::Overflow { codec: self.name() });
        }
        let bytes = (v as u32).to_be_bytes();
        out.extend_from_slice(&bytes[..digits.len() - 1]);
        Ok(())
    }
}

impl Codec for Base85Codec {
    fn name(&self) -> &'static str {
        match self.variant {
            Base85Variant::Adobe => "base85_adobe",
            Base85Variant::Ascii85 => "base85_ascii",
            Base85Variant::Z85 => "base85_z85",
        }
    }

    fn encode(&self, input: &[u8], _opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity((input.len() + 3) / 4 * 5);
        for group in input.chunks(4) {
            self.encode_group(group, &mut out);
        }
        Ok(out)
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(input.len() / 5 * 4 + 4);
        let mut group = [0u8; 5];
        let mut filled = 0;

        for (offset, &c) in input.iter().enumerate() {
            if self.variant == Base85Variant::Adobe && c == ADOBE_ZERO_RUN && filled == 0 {
                out.extend_from_slice(&[0u8; 4]);
                continue;
            }
            let d = self.decode_table[c as usize];
            if d == 0xFF {
                if opts.ignore_garbage {
                    continue;
                }
                return Err(invalid_char(self.name(), input, offset));
            }
            group[filled] = d;
            filled += 1;
            if filled == 5 {
                self.decode_group(&group, &mut out)?;
                filled = 0;
            }
        }
        if filled > 0 {
            self.decode_group(&group[..filled], &mut out)?;
        }

        Ok(out)
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        input
            .iter()
            .copied()
            .filter(|&c| {
                self.decode_table[c as usize] != 0xFF
                    || (self.variant == Base85Variant::Adobe && c == ADOBE_ZERO_RUN)
            })
            .collect()
    }
}
