//! Base32 family: RFC 3548, RFC 4648 extended-hex, Crockford and z-base-32.
//!
//! 5 input bytes map to 8 characters. Padded variants fill the last group
//! with `=`; unpadded variants emit `ceil(8k/5)` characters for a k-byte tail.

use crate::codecs::types::{apply_case, build_decode_table, invalid_char, Codec, CodecError, CodecOptions};

const PAD: u8 = b'=';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base32Variant {
    Rfc3548,
    Rfc4648,
    Crockford,
    ZBase32,
}

impl Base32Variant {
    fn alphabet(self) -> &'static [u8; 32] {
        match self {
            Base32Variant::Rfc3548 => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567",
            Base32Variant::Rfc4648 => b"0123456789ABCDEFGHIJKLMNOPQRSTUV",
            Base32Variant::Crockford => b"0123456789ABCDEFGHJKMNPQRSTVWXYZ",
            Base32Variant::ZBase32 => b"ybndrfg8ejkmcpqxot1uwisza345h769",
        }
    }

    fn padded(self) -> bool {
        matches!(self, Base32Variant::Rfc3548 | Base32Variant::Rfc4648)
    }

    fn name(self) -> &'static str {
        match self {
            Base32Variant::Rfc3548 => "base32_rfc3548",
            Base32Variant::Rfc4648 => "base32_rfc4648",
            Base32Variant::Crockford => "base32_crockford",
            Base32Variant::ZBase32 => "base32_zbase32",
        }
    }
}

pub struct Base32Codec {
    variant: Base32Variant,
    decode_table: [u8; 256],
}

impl Base32Codec {
    pub fn new(variant: Base32Variant) -> Self {
        let alphabet = variant.alphabet();
        let mut decode_table = build_decode_table(alphabet);

        // Case-insensitive on decode.
        for (i, &c) in alphabet.iter().enumerate() {
            decode_table[c.to_ascii_lowercase() as usize] = i as u8;
            decode_table[c.to_ascii_uppercase() as usize] = i as u8;
        }
        if variant == Base32Variant::Crockford {
            for (alias, target) in [(b'O', b'0'), (b'I', b'1'), (b'L', b'1')] {
                let v = decode_table[target as usize];
                decode_table[alias as usize] = v;
                decode_table[alias.to_ascii_lowercase() as usize] = v;
            }
        }

        Self { variant, decode_table }
    }
}

impl Codec for Base32Codec {
    fn name(&self) -> &'static str {
        self.variant.name()
    }

    fn encode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let alphabet = self.variant.alphabet();
        let mut out = Vec::with_capacity((input.len() + 4) / 5 * 8);

        for group in input.chunks(5) {
            let mut buf = [0u8; 5];
            buf[..group.len()].copy_from_slice(group);
            let v = buf.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);

            let chars = (group.len() * 8 + 4) / 5;
            for i in 0..chars {
                let idx = (v >> (35 - i * 5)) & 0x1F;
                out.push(alphabet[idx as usize]);
            }
            if self.variant.padded() {
                out.extend(std::iter::repeat(PAD).take(8 - chars));
            }
        }

        Ok(apply_case(out, opts.output_case))
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(input.len() * 5 / 8);
        let mut acc: u64 = 0;
        let mut bits = 0u32;

        for (offset, &c) in input.iter().enumerate() {
            if c == PAD {
                // Leftover bits of a padded group are zero fill.
                acc = 0;
                bits = 0;
                continue;
            }
            let v = self.decode_table[c as usize];
            if v == 0xFF {
                if opts.ignore_garbage {
                    continue;
                }
                return Err(invalid_char(self.name(), input, offset));
            }
            acc = (acc << 5) | v as u64;
            bits += 5;
            if bits >= 8 {
                bits -= 8;
                out.push((acc >> bits) as u8);
                acc &= (1 << bits) - 1;
            }
        }

        Ok(out)
    }

    fn strip_garbage(&self, input: &[u8]) -> Vec<u8> {
        input
            .iter()
            .copied()
            .filter(|&c| c == PAD || self.decode_table[c as usize] != 0xFF)
            .collect()
    }
}
