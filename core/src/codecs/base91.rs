//! basE91 bit-stream codec.
//!
//! Emits 13 or 14 bits per character pair, so there is no fixed block
//! boundary: the stream layer treats it as unbounded.

use crate::codecs::types::{build_decode_table, invalid_char, Codec, CodecError, CodecOptions};

const ALPHABET: &[u8; 91] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~\"";

pub struct Base91Codec {
    decode_table: [u8; 256],
}

impl Base91Codec {
    pub fn new() -> Self {
        Self { decode_table: build_decode_table(ALPHABET) }
    }
}

impl Default for Base91Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for Base91Codec {
    fn name(&self) -> &'static str {
        "base91"
    }

    fn encode(&self, input: &[u8], _opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(input.len() * 16 / 13 + 2);
        let mut acc: u32 = 0;
        let mut bits = 0u32;

        for &b in input {
            acc |= (b as u32) << bits;
            bits += 8;
            if bits > 13 {
                let mut v = acc & 8191;
                if v > 88 {
                    acc >>= 13;
                    bits -= 13;
                } else {
                    v = acc & 16383;
                    acc >>= 14;
                    bits -= 14;
                }
                out.push(ALPHABET[(v % 91) as usize]);
                out.push(ALPHABET[(v / 91) as usize]);
            }
        }

        if bits > 0 {
            out.push(ALPHABET[(acc % 91) as usize]);
            if bits > 7 || acc > 90 {
                out.push(ALPHABET[(acc / 91) as usize]);
            }
        }

        Ok(out)
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(input.len() * 14 / 16 + 1);
        let mut acc: u32 = 0;
        let mut bits = 0u32;
        let mut pending: Option<u32> = None;

        for (offset, &c) in input.iter().enumerate() {
            let d = self.decode_table[c as usize];
            if d == 0xFF {
                if opts.ignore_garbage {
                    continue;
                }
                return Err(invalid_char(self.name(), input, offset));
            }
            match pending.take() {
                None => pending = Some(d as u32),
                Some(lo) => {
                    let v = lo + d as u32 * 91;
                    acc |= v << bits;
                    bits += if (v & 8191) > 88 { 13 } else { 14 };
                    loop {
                        out.push(acc as u8);
                        acc >>= 8;
                        bits -= 8;
                        if bits <= 7 {
                            break;
                        }
                    }
                }
            }
        }

        if let Some(lo) = pending {
            out.push((acc | lo << bits) as u8);
        }

        Ok(out)
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        input
            .iter()
            .copied()
            .filter(|&c| self.decode_table[c as usize] != 0xFF)
            .collect()
    }
}
