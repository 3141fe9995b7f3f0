//! Base2048: 11 bits per character over a contiguous CJK block.
//!
//! 11 input bytes map to exactly 8 characters. A final group carrying at most
//! 3 bits is written with one of 8 tail characters (2-byte UTF-8), any other
//! final group is zero padded into a main character (3-byte UTF-8). Decoding
//! drops the leftover (< 8) padding bits.
//!
//! Encoded units are code points of varying UTF-8 width, so the stream layer
//! aligns decode input on code-point count, not byte length.

use crate::codecs::types::{Codec, CodecError, CodecOptions};

const MAIN_FIRST: u32 = 0x4E00;
const MAIN_LEN: u32 = 2048;
const TAIL_FIRST: u32 = 0x0100;
const TAIL_LEN: u32 = 8;

pub struct Base2048Codec;

enum Symbol {
    Main(u32),
    Tail(u32),
}

fn classify(c: char) -> Option<Symbol> {
    let cp = c as u32;
    if (MAIN_FIRST..MAIN_FIRST + MAIN_LEN).contains(&cp) {
        Some(Symbol::Main(cp - MAIN_FIRST))
    } else if (TAIL_FIRST..TAIL_FIRST + TAIL_LEN).contains(&cp) {
        Some(Symbol::Tail(cp - TAIL_FIRST))
    } else {
        None
    }
}

fn push_char(out: &mut String, cp: u32) {
    // Both ranges lie outside the surrogate block.
    if let Some(c) = char::from_u32(cp) {
        out.push(c);
    }
}

impl Codec for Base2048Codec {
    fn name(&self) -> &'static str {
        "base2048"
    }

    fn encode(&self, input: &[u8], _opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = String::with_capacity(input.len() * 8 / 11 * 3 + 3);
        let mut acc: u32 = 0;
        let mut bits = 0u32;

        for &b in input {
            acc = (acc << 8) | b as u32;
            bits += 8;
            if bits >= 11 {
                bits -= 11;
                push_char(&mut out, MAIN_FIRST + ((acc >> bits) & 0x7FF));
                acc &= (1 << bits) - 1;
            }
        }

        if bits > 0 {
            if bits <= 3 {
                push_char(&mut out, TAIL_FIRST + ((acc << (3 - bits)) & 0x7));
            } else {
                push_char(&mut out, MAIN_FIRST + ((acc << (11 - bits)) & 0x7FF));
            }
        }

        Ok(out.into_bytes())
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let text = String::from_utf8_lossy(input);
        let mut out = Vec::with_capacity(text.len() / 3 * 11 / 8 + 1);
        let mut acc: u32 = 0;
        let mut bits = 0u32;
        let mut finished = false;

        for (offset, c) in text.char_indices() {
            let symbol = match classify(c) {
                Some(s) => s,
                None if opts.ignore_garbage => continue,
                None => {
                    return Err(CodecError::InvalidCharacter { codec: "base2048", found: c, offset });
                }
            };
            if finished {
                return Err(CodecError::Malformed {
                    codec: "base2048",
                    msg: "data after tail character".into(),
                });
            }
            let (value, width) = match symbol {
                Symbol::Main(v) => (v, 11),
                Symbol::Tail(v) => {
                    finished = true;
                    (v, 3)
                }
            };
            acc = (acc << width) | value;
            bits += width;
            while bits >= 8 {
                bits -= 8;
                out.push((acc >> bits) as u8);
                acc &= (1 << bits) - 1;
            }
        }

        Ok(out)
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        let text = String::from_utf8_lossy(input);
        text.chars()
            .filter(|&c| classify(c).is_some())
            .collect::<String>()
            .into_bytes()
    }
}
