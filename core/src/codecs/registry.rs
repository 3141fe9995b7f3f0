//! codecs/registry.rs
//! Closed converter set with statically declared descriptors.
//!
//! Names are matched case-insensitively. `simplebaseN` covers every radix in
//! `SIMPLE_BASE_MIN..=SIMPLE_BASE_MAX`.

use crate::codecs::{
    base1::Base1Codec,
    base16::Base16Codec,
    base2048::Base2048Codec,
    base32::{Base32Codec, Base32Variant},
    base64::{Base64Codec, Base64Variant},
    base85::{Base85Codec, Base85Variant},
    base91::Base91Codec,
    leb128::Leb128Codec,
    radix::{RadixCodec, RadixVariant, SIMPLE_BASE_MAX, SIMPLE_BASE_MIN},
    types::{Codec, CodecDescriptor, FramingKind},
    uuencode::{UuCodec, UuVariant},
};

const SIMPLE_PREFIX: &str = "simplebase";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    /// Unary; tiny inputs only.
    Base1,
    Base16,
    Base32Crockford,
    Base32Rfc3548,
    Base32Rfc4648,
    Base32ZBase32,
    Base58,
    Base58Bitcoin,
    Base58Flickr,
    Base64,
    Base64UrlSafe,
    Base85Adobe,
    Base85Ascii,
    Base85Z85,
    Base91,
    Base2048,
    Uuencode,
    Xxencode,
    Leb128,
    /// Radix in `2..=62`.
    SimpleBase(u32),
}

/// Fixed-name converters in listing order.
const NAMED: &[(&str, Converter)] = &[
    ("base1", Converter::Base1),
    ("base16", Converter::Base16),
    ("base32_crockford", Converter::Base32Crockford),
    ("base32_rfc3548", Converter::Base32Rfc3548),
    ("base32_rfc4648", Converter::Base32Rfc4648),
    ("base32_zbase32", Converter::Base32ZBase32),
    ("base58", Converter::Base58),
    ("base58_bitcoin", Converter::Base58Bitcoin),
    ("base58_flickr", Converter::Base58Flickr),
    ("base64", Converter::Base64),
    ("base64_urlsafe", Converter::Base64UrlSafe),
    ("base85_adobe", Converter::Base85Adobe),
    ("base85_ascii", Converter::Base85Ascii),
    ("base85_z85", Converter::Base85Z85),
    ("base91", Converter::Base91),
    ("base2048", Converter::Base2048),
    ("uuencode", Converter::Uuencode),
    ("xxencode", Converter::Xxencode),
    ("leb128", Converter::Leb128),
];

const SIMPLE_NAMES: [&str; (SIMPLE_BASE_MAX - SIMPLE_BASE_MIN + 1) as usize] = [
    "simplebase2", "simplebase3", "simplebase4", "simplebase5", "simplebase6", "simplebase7",
    "simplebase8", "simplebase9", "simplebase10", "simplebase11", "simplebase12", "simplebase13",
    "simplebase14", "simplebase15", "simplebase16", "simplebase17", "simplebase18", "simplebase19",
    "simplebase20", "simplebase21", "simplebase22", "simplebase23", "simplebase24", "simplebase25",
    "simplebase26", "simplebase27", "simplebase28", "simplebase29", "simplebase30", "simplebase31",
    "simplebase32", "simplebase33", "simplebase34", "simplebase35", "simplebase36", "simplebase37",
    "simplebase38", "simplebase39", "simplebase40", "simplebase41", "simplebase42", "simplebase43",
    "simplebase44", "simplebase45", "simplebase46", "simplebase47", "simplebase48", "simplebase49",
    "simplebase50", "simplebase51", "simplebase52", "simplebase53", "simplebase54", "simplebase55",
    "simplebase56", "simplebase57", "simplebase58", "simplebase59", "simplebase60", "simplebase61",
    "simplebase62",
];

impl Converter {
    /// Look a converter up by its command-line name.
    pub fn resolve(name: &str) -> Option<Converter> {
        let lower = name.to_ascii_lowercase();
        if let Some(&(_, c)) = NAMED.iter().find(|(n, _)| *n == lower) {
            return Some(c);
        }
        let digits = lower.strip_prefix(SIMPLE_PREFIX)?;
        // Reject "+7", "007" and the like.
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let base: u32 = digits.parse().ok()?;
        (SIMPLE_BASE_MIN..=SIMPLE_BASE_MAX)
            .contains(&base)
            .then_some(Converter::SimpleBase(base))
    }

    /// Every accepted name, in registry order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        NAMED.iter().map(|(n, _)| *n).chain(SIMPLE_NAMES.iter().copied())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Converter::SimpleBase(base) => {
                let idx = base.saturating_sub(SIMPLE_BASE_MIN) as usize;
                SIMPLE_NAMES.get(idx).copied().unwrap_or(SIMPLE_PREFIX)
            }
            other => NAMED
                .iter()
                .find(|(_, c)| c == other)
                .map(|(n, _)| *n)
                .unwrap_or("unknown"),
        }
    }

    pub fn descriptor(&self) -> CodecDescriptor {
        match self {
            Converter::Base1 => CodecDescriptor::unbounded().case_insensitive(),
            Converter::Base16 => CodecDescriptor::blocks(1, 2).case_insensitive(),
            Converter::Base32Crockford
            | Converter::Base32Rfc3548
            | Converter::Base32Rfc4648
            | Converter::Base32ZBase32 => CodecDescriptor::blocks(5, 8).case_insensitive(),
            Converter::Base58 | Converter::Base58Bitcoin | Converter::Base58Flickr => {
                CodecDescriptor::unbounded()
            }
            Converter::Base64 | Converter::Base64UrlSafe => CodecDescriptor::blocks(3, 4),
            Converter::Base85Adobe => CodecDescriptor::blocks(4, 5).framed(FramingKind::Adobe85),
            Converter::Base85Ascii | Converter::Base85Z85 => CodecDescriptor::blocks(4, 5),
            Converter::Base91 => CodecDescriptor::unbounded(),
            Converter::Base2048 => CodecDescriptor::blocks(11, 8).multi_byte(),
            Converter::Uuencode | Converter::Xxencode => CodecDescriptor {
                block_size_encode: Some(crate::constants::UU_LINE_BYTES),
                block_size_decode: None,
                ..CodecDescriptor::unbounded()
            }
            .framed(FramingKind::Uuencode),
            Converter::Leb128 => CodecDescriptor::unbounded().binary(),
            Converter::SimpleBase(base) if *base <= 36 => CodecDescriptor::unbounded().case_insensitive(),
            Converter::SimpleBase(_) => CodecDescriptor::unbounded(),
        }
    }

    /// Build the codec behind this converter.
    pub fn codec(&self) -> Box<dyn Codec> {
        match self {
            Converter::Base1 => Box::new(Base1Codec),
            Converter::Base16 => Box::new(Base16Codec),
            Converter::Base32Crockford => Box::new(Base32Codec::new(Base32Variant::Crockford)),
            Converter::Base32Rfc3548 => Box::new(Base32Codec::new(Base32Variant::Rfc3548)),
            Converter::Base32Rfc4648 => Box::new(Base32Codec::new(Base32Variant::Rfc4648)),
            Converter::Base32ZBase32 => Box::new(Base32Codec::new(Base32Variant::ZBase32)),
            Converter::Base58Bitcoin => Box::new(RadixCodec::new(RadixVariant::Base58Bitcoin, self.name())),
            // Plain `base58` uses the Flickr ordering.
            Converter::Base58 | Converter::Base58Flickr => {
                Box::new(RadixCodec::new(RadixVariant::Base58Flickr, self.name()))
            }
            Converter::Base64 => Box::new(Base64Codec::new(Base64Variant::Standard)),
            Converter::Base64UrlSafe => Box::new(Base64Codec::new(Base64Variant::UrlSafe)),
            Converter::Base85Adobe => Box::new(Base85Codec::new(Base85Variant::Adobe)),
            Converter::Base85Ascii => Box::new(Base85Codec::new(Base85Variant::Ascii85)),
            Converter::Base85Z85 => Box::new(Base85Codec::new(Base85Variant::Z85)),
            Converter::Base91 => Box::new(Base91Codec::new()),
            Converter::Base2048 => Box::new(Base2048Codec),
            Converter::Uuencode => Box::new(UuCodec::new(UuVariant::Uu)),
            Converter::Xxencode => Box::new(UuCodec::new(UuVariant::Xx)),
            Converter::Leb128 => Box::new(Leb128Codec),
            Converter::SimpleBase(base) => Box::new(RadixCodec::new(RadixVariant::Simple(*base), self.name())),
        }
    }

    /// Sentinel line written before `end` on uuencode-framed encode.
    pub fn uu_sentinel(&self) -> Option<Vec<u8>> {
        match self {
            Converter::Uuencode => Some(UuCodec::new(UuVariant::Uu).sentinel_line()),
            Converter::Xxencode => Some(UuCodec::new(UuVariant::Xx).sentinel_line()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
