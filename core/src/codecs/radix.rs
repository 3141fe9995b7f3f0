//! Big-integer radix codecs: Base58 and SimpleBase2..62.
//!
//! The whole input is one unsigned big-endian integer, so nothing can be
//! emitted before the last byte is known. Leading zero bytes map one-to-one
//! to leading zero digits so that they survive the conversion.
//!
//! Arithmetic runs on u32 limbs and converts `k` digits per pass, where
//! `base^k` is the largest power that still fits a limb. Still quadratic.

use crate::codecs::types::{apply_case, invalid_char, Codec, CodecError, CodecOptions};

const BITCOIN: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const FLICKR: &[u8] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
const SIMPLE: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Radix bounds accepted for `simplebaseN`.
pub const SIMPLE_BASE_MIN: u32 = 2;
pub const SIMPLE_BASE_MAX: u32 = 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadixVariant {
    Base58Bitcoin,
    Base58Flickr,
    Simple(u32),
}

pub struct RadixCodec {
    name: &'static str,
    alphabet: &'static [u8],
    case_insensitive: bool,
    decode_table: [u8; 256],
    /// `base^digits_per_limb`
    limb_base: u32,
    digits_per_limb: usize,
}

impl RadixCodec {
    pub fn new(variant: RadixVariant, name: &'static str) -> Self {
        let (alphabet, case_insensitive) = match variant {
            RadixVariant::Base58Bitcoin => (BITCOIN, false),
            RadixVariant::Base58Flickr => (FLICKR, false),
            RadixVariant::Simple(base) => {
                let base = base.clamp(SIMPLE_BASE_MIN, SIMPLE_BASE_MAX) as usize;
                (&SIMPLE[..base], base <= 36)
            }
        };

        let mut decode_table = [0xFFu8; 256];
        for (i, &c) in alphabet.iter().enumerate() {
            decode_table[c as usize] = i as u8;
            if case_insensitive {
                decode_table[c.to_ascii_uppercase() as usize] = i as u8;
            }
        }

        let base = alphabet.len() as u64;
        let mut limb_base = base;
        let mut digits_per_limb = 1;
        while limb_base * base <= u32::MAX as u64 {
            limb_base *= base;
            digits_per_limb += 1;
        }

        Self {
            name,
            alphabet,
            case_insensitive,
            decode_table,
            limb_base: limb_base as u32,
            digits_per_limb,
        }
    }

    fn base(&self) -> u32 {
        self.alphabet.len() as u32
    }
}

/// Big-endian bytes into big-endian u32 limbs.
fn bytes_to_limbs(bytes: &[u8]) -> Vec<u32> {
    let head = bytes.len() % 4;
    let mut limbs = Vec::with_capacity(bytes.len() / 4 + 1);
    if head > 0 {
        limbs.push(bytes[..head].iter().fold(0u32, |acc, &b| (acc << 8) | b as u32));
    }
    for word in bytes[head..].chunks_exact(4) {
        limbs.push(u32::from_be_bytes([word[0], word[1], word[2], word[3]]));
    }
    limbs
}

/// Divide big-endian limbs in place, dropping leading zero limbs; returns the remainder.
fn div_rem_in_place(limbs: &mut Vec<u32>, divisor: u32) -> u32 {
    let d = divisor as u64;
    let mut rem: u64 = 0;
    for limb in limbs.iter_mut() {
        let cur = (rem << 32) | *limb as u64;
        *limb = (cur / d) as u32;
        rem = cur % d;
    }
    let first = limbs.iter().position(|&l| l != 0).unwrap_or(limbs.len());
    limbs.drain(..first);
    rem as u32
}

/// `limbs = limbs * mul + add` on little-endian limbs.
fn mul_add_in_place(limbs: &mut Vec<u32>, mul: u32, add: u32) {
    let mut carry = add as u64;
    for limb in limbs.iter_mut() {
        let cur = *limb as u64 * mul as u64 + carry;
        *limb = cur as u32;
        carry = cur >> 32;
    }
    if carry > 0 {
        limbs.push(carry as u32);
    }
}

impl Codec for RadixCodec {
    fn name(&self) -> &'static str {
        self.name
    }

    fn encode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let zeros = input.iter().take_while(|&&b| b == 0).count();
        let mut limbs = bytes_to_limbs(&input[zeros..]);
        let first = limbs.iter().position(|&l| l != 0).unwrap_or(limbs.len());
        limbs.drain(..first);

        let base = self.base();
        // Least significant digit first.
        let mut digits: Vec<u8> = Vec::new();
        while !limbs.is_empty() {
            let mut r = div_rem_in_place(&mut limbs, self.limb_base);
            if limbs.is_empty() {
                while r > 0 {
                    digits.push((r % base) as u8);
                    r /= base;
                }
            } else {
                for _ in 0..self.digits_per_limb {
                    digits.push((r % base) as u8);
                    r /= base;
                }
            }
        }

        let mut out = Vec::with_capacity(zeros + digits.len());
        out.extend(std::iter::repeat(self.alphabet[0]).take(zeros));
        out.extend(digits.iter().rev().map(|&d| self.alphabet[d as usize]));

        if self.case_insensitive {
            out = apply_case(out, opts.output_case);
        }
        Ok(out)
    }

    fn decode(&self, input: &[u8], opts: &CodecOptions) -> Result<Vec<u8>, CodecError> {
        let mut digits = Vec::with_capacity(input.len());
        for (offset, &c) in input.iter().enumerate() {
            let d = self.decode_table[c as usize];
            if d == 0xFF {
                if opts.ignore_garbage {
                    continue;
                }
                return Err(invalid_char(self.name, input, offset));
            }
            digits.push(d);
        }

        let zeros = digits.iter().take_while(|&&d| d == 0).count();
        let base = self.base();

        let mut limbs: Vec<u32> = Vec::new();
        for group in digits[zeros..].chunks(self.digits_per_limb) {
            let mul = base.pow(group.len() as u32);
            let add = group.iter().fold(0u32, |acc, &d| acc * base + d as u32);
            mul_add_in_place(&mut limbs, mul, add);
        }

        let mut out = vec![0u8; zeros];
        let mut started = false;
        for limb in limbs.iter().rev() {
            for b in limb.to_be_bytes() {
                if b != 0 || started {
                    started = true;
                    out.push(b);
                }
            }
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
